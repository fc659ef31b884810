//! Axum router configuration for all endpoints

use axum::{
  middleware,
  routing::{get, post},
  Router,
};

use crate::server::handlers::{assistant, chat, status, storefront};
use crate::server::middleware::request_context_middleware;
use crate::server::state::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
  Router::new()
    // Status endpoint
    .route("/status", get(status::status))
    // Chat pipeline
    .route("/chat-endpoint", post(chat::chat))
    // Storefront endpoints
    .route("/redirect-endpoint", get(storefront::redirect))
    .route("/vehicles-endpoint", get(storefront::vehicles))
    .route("/import-endpoint", post(storefront::import))
    // Turn-based assistant
    .route("/greeting-endpoint", get(assistant::greeting))
    .route("/assistant-endpoint", post(assistant::assistant_turn))
    .layer(middleware::from_fn(request_context_middleware))
    .with_state(state)
}
