mod metrics;
mod transcript;

pub use metrics::*;
pub use transcript::*;

use std::time::Duration;

use axum::{extract::rejection::JsonRejection, http::StatusCode, Json};
use earnings_config::TranscriptConfig;
use earnings_core::error::EarningsError;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::state::AppState;

pub type ApiError = (StatusCode, Json<Value>);
pub type ApiResult = Result<Json<Value>, ApiError>;

// ── Envelope ────────────────────────────────────────────────────────

fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// `{ "success": true, "data", "timestamp" }`
pub fn ok<T: Serialize>(data: T) -> ApiResult {
    let data = serde_json::to_value(data).map_err(|e| fail(&EarningsError::from(e)))?;
    Ok(Json(json!({
        "success": true,
        "data": data,
        "timestamp": timestamp(),
    })))
}

fn status_for(err: &EarningsError) -> StatusCode {
    match err {
        EarningsError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        e if e.is_client_error() => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// `{ "success": false, "error", "timestamp" }` with a status matching the error.
pub fn fail(err: &EarningsError) -> ApiError {
    let status = status_for(err);
    if status.is_server_error() {
        warn!(error = %err, "request failed");
    }
    (
        status,
        Json(json!({
            "success": false,
            "error": err.to_string(),
            "timestamp": timestamp(),
        })),
    )
}

/// Unwrap a JSON body, turning extractor rejections into a 400 envelope.
pub fn parse_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(v)| v)
        .map_err(|rejection| fail(&EarningsError::DataError(rejection.body_text())))
}

// ── Validation ──────────────────────────────────────────────────────

pub fn validate_transcript(text: &str, limits: &TranscriptConfig) -> Result<(), EarningsError> {
    let len = text.trim().chars().count();
    if len < limits.min_length {
        return Err(EarningsError::ValidationError(format!(
            "transcript must be at least {} characters, got {len}",
            limits.min_length
        )));
    }
    if len > limits.max_length {
        return Err(EarningsError::ValidationError(format!(
            "transcript must be at most {} characters, got {len}",
            limits.max_length
        )));
    }
    Ok(())
}

// ── Blocking work ───────────────────────────────────────────────────

/// Run CPU-bound analysis off the async runtime, bounded by `timeout_ms`.
pub async fn run_blocking<T, F>(state: &AppState, work: F) -> Result<T, EarningsError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let timeout_ms = state.config.transcript.timeout_ms;
    let budget = Duration::from_millis(timeout_ms);
    match tokio::time::timeout(budget, tokio::task::spawn_blocking(work)).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(join_err)) => Err(EarningsError::AnalysisError(join_err.to_string())),
        Err(_) => Err(EarningsError::Timeout(timeout_ms)),
    }
}

// ── Health ──────────────────────────────────────────────────────────

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": timestamp(),
    }))
}
