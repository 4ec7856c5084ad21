use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;
use tracing::info;

use earnings_metrics::{build_earnings_report, MetricsInput, TranscriptInsights};
use earnings_nlp::report::{extractive_summary, guidance_statements};
use earnings_nlp::{analyze_sentiment, clean_transcript};

use super::{fail, ok, parse_body, run_blocking, validate_transcript, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsRequest {
    #[serde(flatten)]
    pub input: MetricsInput,
    #[serde(default)]
    pub transcript: Option<String>,
}

/// POST /api/metrics: earnings figures plus an optional transcript read
pub async fn earnings_metrics(
    State(state): State<AppState>,
    body: Result<Json<MetricsRequest>, JsonRejection>,
) -> ApiResult {
    let req = parse_body(body)?;
    req.input.validate().map_err(|e| fail(&e))?;

    let insights = match req.transcript {
        Some(text) => {
            validate_transcript(&text, &state.config.transcript).map_err(|e| fail(&e))?;
            let options = state.report_options();
            run_blocking(&state, move || {
                let cleaned = clean_transcript(&text);
                TranscriptInsights {
                    sentiment: Some(analyze_sentiment(&cleaned)),
                    summary: extractive_summary(&cleaned, options.summary_sentences),
                    guidance: guidance_statements(&cleaned, options.max_guidance),
                }
            })
            .await
            .map_err(|e| fail(&e))?
        }
        None => TranscriptInsights::default(),
    };

    let today = chrono::Utc::now().date_naive();
    let report = build_earnings_report(&req.input, insights, today).map_err(|e| fail(&e))?;
    info!(ticker = %report.ticker, highlights = report.key_highlights.len(), "earnings report built");
    ok(report)
}
