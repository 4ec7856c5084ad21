use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

fn transcript_routes() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(handlers::analyze_transcript))
        .route("/keywords", post(handlers::transcript_keywords))
        .route("/report", post(handlers::transcript_report))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/metrics", post(handlers::earnings_metrics))
        .nest("/api/transcript", transcript_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
