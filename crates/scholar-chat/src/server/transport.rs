//! HTTP transport.
//!
//! Exposes the pipeline as `POST /chat` with health endpoints. Pipeline
//! failures are already mapped to message responses, so `/chat` answers
//! 200 for any well-formed request.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::models::BotResponse;
use crate::pipeline::SummaryOrchestrator;

/// Body of a `POST /chat` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Free-text query.
    pub query: String,
}

/// Create the HTTP router.
///
/// `max_concurrent` bounds in-flight requests; further requests wait.
pub fn create_router(orchestrator: Arc<SummaryOrchestrator>, max_concurrent: usize) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .route("/chat", post(handle_chat))
        .layer(ConcurrencyLimitLayer::new(max_concurrent.max(1)))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(orchestrator)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "scholar-chat",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn handle_chat(
    State(orchestrator): State<Arc<SummaryOrchestrator>>,
    Json(req): Json<ChatRequest>,
) -> Json<BotResponse> {
    tracing::debug!(query_len = req.query.len(), "Handling chat request");
    Json(orchestrator.handle_user_query(&req.query).await)
}
