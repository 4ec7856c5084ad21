use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;
use tracing::info;

use earnings_nlp::{analyze_sentiment, build_report, get_keyword_analysis};

use super::{fail, ok, parse_body, run_blocking, validate_transcript, ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TranscriptRequest {
    pub transcript: String,
}

/// Parse and length-check a transcript body.
fn accept(
    state: &AppState,
    body: Result<Json<TranscriptRequest>, JsonRejection>,
) -> Result<String, ApiError> {
    let req = parse_body(body)?;
    validate_transcript(&req.transcript, &state.config.transcript).map_err(|e| fail(&e))?;
    Ok(req.transcript)
}

/// POST /api/transcript/analyze
pub async fn analyze_transcript(
    State(state): State<AppState>,
    body: Result<Json<TranscriptRequest>, JsonRejection>,
) -> ApiResult {
    let text = accept(&state, body)?;
    let result = run_blocking(&state, move || analyze_sentiment(&text))
        .await
        .map_err(|e| fail(&e))?;
    info!(
        label = %result.overall_label,
        score = result.overall_score,
        "transcript analyzed"
    );
    ok(result)
}

/// POST /api/transcript/keywords
pub async fn transcript_keywords(
    State(state): State<AppState>,
    body: Result<Json<TranscriptRequest>, JsonRejection>,
) -> ApiResult {
    let text = accept(&state, body)?;
    let counts = run_blocking(&state, move || get_keyword_analysis(&text))
        .await
        .map_err(|e| fail(&e))?;
    ok(counts)
}

/// POST /api/transcript/report
pub async fn transcript_report(
    State(state): State<AppState>,
    body: Result<Json<TranscriptRequest>, JsonRejection>,
) -> ApiResult {
    let text = accept(&state, body)?;
    let options = state.report_options();
    let report = run_blocking(&state, move || build_report(&text, &options))
        .await
        .map_err(|e| fail(&e))?;
    ok(report)
}
