//! Turn-based assistant handlers

use axum::{
  extract::{Json, State},
  http::StatusCode,
  response::Json as ResponseJson,
};

use crate::catalog::assistant::{greeting as greeting_turn, handle_turn, Turn};
use crate::server::state::AppState;
use crate::server::types::{AssistantRequest, ErrorResponse};

/// GET /greeting-endpoint - Opening turn of a new conversation
pub async fn greeting() -> ResponseJson<Turn> {
  ResponseJson(greeting_turn())
}

/// POST /assistant-endpoint - Advance a conversation by one message
pub async fn assistant_turn(
  State(state): State<AppState>,
  Json(request): Json<AssistantRequest>,
) -> Result<ResponseJson<Turn>, (StatusCode, ResponseJson<ErrorResponse>)> {
  let input = request.input.unwrap_or_default();
  if input.trim().is_empty() {
    return Err((StatusCode::BAD_REQUEST, ResponseJson(ErrorResponse::new("Missing input"))));
  }

  Ok(ResponseJson(handle_turn(request.state, &input, &state.catalog)))
}
