//! Chat endpoint handler

use axum::{
  body::Bytes,
  extract::{Extension, State},
  http::StatusCode,
  response::Json as ResponseJson,
};
use tracing::{error, info};

use crate::pipeline::ChatOutcome;
use crate::server::middleware::RequestContext;
use crate::server::state::AppState;
use crate::server::types::{AnswerResponse, ChatRequest, ChatResponse, ChatSuccessResponse, ErrorResponse};

/// POST /chat-endpoint - Answer a free-text fitment question
///
/// The body is read as JSON whatever the `Content-Type` says; only a body
/// that does not decode is a 400. A `query` that is absent, empty or only
/// whitespace is `400 {"error": "Missing query"}`.
pub async fn chat(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
  body: Bytes,
) -> Result<ResponseJson<ChatResponse>, (StatusCode, ResponseJson<ErrorResponse>)> {
  let request: ChatRequest = match serde_json::from_slice(&body) {
    Ok(request) => request,
    Err(e) => {
      info!(request_id = %context.request_id, "rejected chat body: {e}");
      return Err((StatusCode::BAD_REQUEST, ResponseJson(ErrorResponse::new(format!("Invalid JSON body: {e}")))));
    }
  };

  let query = match request.query.as_deref().map(str::trim) {
    Some(query) if !query.is_empty() => query.to_string(),
    _ => return Err((StatusCode::BAD_REQUEST, ResponseJson(ErrorResponse::new("Missing query")))),
  };

  match state.orchestrator.handle(&query).await {
    Ok(ChatOutcome::Answered(result)) => {
      Ok(ResponseJson(ChatResponse::Matched(ChatSuccessResponse { status: "ok".to_string(), result })))
    }
    Ok(ChatOutcome::NoFitment { answer }) | Ok(ChatOutcome::NoProduct { answer }) => {
      Ok(ResponseJson(ChatResponse::Guidance(AnswerResponse { answer })))
    }
    Err(e) => {
      error!(request_id = %context.request_id, stage = %e.stage(), "chat request failed: {e}");
      Err((StatusCode::INTERNAL_SERVER_ERROR, ResponseJson(ErrorResponse::new(e.to_string()))))
    }
  }
}
