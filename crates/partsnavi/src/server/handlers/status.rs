//! Status endpoint handler

use axum::{extract::State, response::Json};

use crate::server::state::AppState;
use crate::server::types::StatusResponse;

/// GET /status - Health check endpoint
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
  Json(StatusResponse {
    status: "healthy".to_string(),
    version: env!("CARGO_PKG_VERSION").to_string(),
    store: state.orchestrator.store().backend().to_string(),
    started_at: state.started_at,
  })
}
