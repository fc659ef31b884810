//! REST API types with schemars annotations for OpenAPI generation

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::catalog::assistant::AssistantState;
use crate::models::ChatResult;

// Shared
// ======

/// Error body returned with every non-2xx status
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ErrorResponse {
  /// Human readable error message
  pub error: String,
}

impl ErrorResponse {
  pub fn new(message: impl Into<String>) -> Self {
    Self { error: message.into() }
  }
}

// Chat Endpoint
// =============

/// Request for /chat-endpoint
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ChatRequest {
  /// Free-text description of the vehicle and part
  #[serde(default)]
  pub query: Option<String>,
}

/// Successful chat answer with matched products
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ChatSuccessResponse {
  /// Always `"ok"`
  pub status: String,

  #[serde(flatten)]
  pub result: ChatResult,
}

/// Guidance-only chat answer (nothing matched)
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnswerResponse {
  pub answer: String,
}

/// Body of a 200 response from /chat-endpoint
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ChatResponse {
  Matched(ChatSuccessResponse),
  Guidance(AnswerResponse),
}

impl ChatResponse {
  pub fn answer(&self) -> &str {
    match self {
      ChatResponse::Matched(success) => &success.result.answer,
      ChatResponse::Guidance(guidance) => &guidance.answer,
    }
  }
}

// Redirect Endpoint
// =================

/// Query string of /redirect-endpoint
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct RedirectParams {
  /// Free text naming the wanted part
  #[serde(default)]
  pub q: Option<String>,
}

impl RedirectParams {
  /// Build from raw query pairs, keeping the first `q`
  pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
    let q = pairs.into_iter().find(|(key, _)| key == "q").map(|(_, value)| value);
    Self { q }
  }
}

// Import Endpoint
// ===============

/// Response for /import-endpoint
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ImportResponse {
  pub status: String,

  /// Products processed (fitment failures are not reflected here)
  pub inserted: usize,
}

// Assistant Endpoint
// ==================

/// Request for /assistant-endpoint
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AssistantRequest {
  /// Conversation state returned by the previous turn
  #[serde(default)]
  pub state: AssistantState,

  /// The user's message for this turn
  #[serde(default)]
  pub input: Option<String>,
}

// Status Endpoint
// ===============

/// Response for /status endpoint
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct StatusResponse {
  pub status: String,
  pub version: String,

  /// Table store backend in use
  pub store: String,

  pub started_at: DateTime<Utc>,
}
