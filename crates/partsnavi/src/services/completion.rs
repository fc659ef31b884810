//! Chat-completion client for the hosted language model

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::error::CompletionError;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// A single chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
  pub role: String,
  pub content: String,
}

impl ChatMessage {
  pub fn user(content: impl Into<String>) -> Self {
    Self { role: "user".to_string(), content: content.into() }
  }
}

/// Request body of `POST /chat/completions`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
  pub model: String,
  pub messages: Vec<ChatMessage>,
  pub temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
  #[serde(default)]
  choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
  message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
  content: Option<String>,
}

/// Prompt in, text out. `Ok(None)` means the service answered without content.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionService: Send + Sync {
  async fn complete(&self, request: CompletionRequest) -> Result<Option<String>, CompletionError>;
}

/// Process-wide shared completion handle
pub type SharedCompletionService = Arc<dyn CompletionService>;

/// Configuration for the OpenAI-compatible client
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
  pub api_key: String,
  pub base_url: String,
  pub timeout: Option<Duration>,
}

impl Default for OpenAiConfig {
  fn default() -> Self {
    Self { api_key: String::new(), base_url: DEFAULT_BASE_URL.to_string(), timeout: None }
  }
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint
pub struct OpenAiClient {
  client: Client,
  config: OpenAiConfig,
}

impl OpenAiClient {
  pub fn new(config: OpenAiConfig) -> Result<Self, CompletionError> {
    let mut builder = Client::builder();
    if let Some(timeout) = config.timeout {
      builder = builder.timeout(timeout);
    }

    Ok(Self { client: builder.build()?, config })
  }
}

#[async_trait]
impl CompletionService for OpenAiClient {
  async fn complete(&self, request: CompletionRequest) -> Result<Option<String>, CompletionError> {
    let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
    let response = self
      .client
      .post(&url)
      .bearer_auth(&self.config.api_key)
      .json(&request)
      .send()
      .await?;

    let status = response.status();
    if !status.is_success() {
      let message = response.text().await.unwrap_or_default();
      return Err(CompletionError::Rejected { status: status.as_u16(), message });
    }

    let body: CompletionResponse = response.json().await?;
    Ok(body.choices.into_iter().next().and_then(|choice| choice.message).and_then(|m| m.content))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use mockito::{Matcher, Server};
  use serde_json::json;

  fn request() -> CompletionRequest {
    CompletionRequest {
      model: DEFAULT_MODEL.to_string(),
      messages: vec![ChatMessage::user("アクアのオイルフィルター")],
      temperature: 0.0,
    }
  }

  fn client_for(server: &Server) -> OpenAiClient {
    OpenAiClient::new(OpenAiConfig {
      api_key: "sk-test".to_string(),
      base_url: server.url(),
      timeout: None,
    })
    .unwrap()
  }

  #[tokio::test]
  async fn test_complete_returns_first_choice_content() {
    let mut server = Server::new_async().await;
    let _mock = server
      .mock("POST", "/chat/completions")
      .match_header("authorization", "Bearer sk-test")
      .match_body(Matcher::Json(json!({
        "model": "gpt-4o-mini",
        "messages": [{"role": "user", "content": "アクアのオイルフィルター"}],
        "temperature": 0.0
      })))
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body(r#"{"choices": [{"message": {"role": "assistant", "content": "{\"model\": \"アクア\"}"}}]}"#)
      .create_async()
      .await;

    let content = client_for(&server).complete(request()).await.unwrap();
    assert_eq!(content.as_deref(), Some(r#"{"model": "アクア"}"#));
  }

  #[tokio::test]
  async fn test_complete_without_choices_yields_none() {
    let mut server = Server::new_async().await;
    let _mock = server
      .mock("POST", "/chat/completions")
      .with_status(200)
      .with_body(r#"{"choices": []}"#)
      .create_async()
      .await;

    assert_eq!(client_for(&server).complete(request()).await.unwrap(), None);
  }

  #[tokio::test]
  async fn test_complete_surfaces_service_errors() {
    let mut server = Server::new_async().await;
    let _mock = server
      .mock("POST", "/chat/completions")
      .with_status(429)
      .with_body("rate limited")
      .create_async()
      .await;

    let result = client_for(&server).complete(request()).await;
    match result {
      Err(CompletionError::Rejected { status, message }) => {
        assert_eq!(status, 429);
        assert_eq!(message, "rate limited");
      }
      other => panic!("Expected Rejected error, got: {other:?}"),
    }
  }
}
