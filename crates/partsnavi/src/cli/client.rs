//! HTTP client for the partsnavi REST API
//!
//! Thin wrapper used by the CLI so every command goes through the same
//! endpoints a browser would.

use anyhow::{anyhow, Result};
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

use crate::catalog::assistant::{AssistantState, Turn};
use crate::server::types::{
  AssistantRequest, ChatRequest, ChatResponse, ErrorResponse, ImportResponse, StatusResponse,
};

/// Configuration for the partsnavi HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
  /// Base URL of the partsnavi server (e.g., "http://localhost:3000")
  pub base_url: String,
  /// Request timeout in seconds
  pub timeout_secs: u64,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self { base_url: "http://localhost:3000".to_string(), timeout_secs: 60 }
  }
}

/// HTTP client for the partsnavi REST API
pub struct PartsnaviClient {
  client: Client,
  config: ClientConfig,
}

impl PartsnaviClient {
  pub fn with_config(config: ClientConfig) -> Result<Self> {
    // Redirects are reported, not followed, so `link` can show the target
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .redirect(Policy::none())
      .build()?;

    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  async fn error_text(response: reqwest::Response) -> String {
    let status = response.status();
    match response.json::<ErrorResponse>().await {
      Ok(body) => body.error,
      Err(_) => format!("HTTP {status}"),
    }
  }

  /// Ask the chat pipeline a free-text question
  pub async fn chat(&self, query: &str) -> Result<ChatResponse> {
    let request = ChatRequest { query: Some(query.to_string()) };
    let response = self.client.post(self.url("/chat-endpoint")).json(&request).send().await?;

    if !response.status().is_success() {
      return Err(anyhow!("Chat request failed: {}", Self::error_text(response).await));
    }

    Ok(response.json().await?)
  }

  /// Advance an assistant conversation by one message
  pub async fn assistant_turn(&self, state: AssistantState, input: &str) -> Result<Turn> {
    let request = AssistantRequest { state, input: Some(input.to_string()) };
    let response = self.client.post(self.url("/assistant-endpoint")).json(&request).send().await?;

    if !response.status().is_success() {
      return Err(anyhow!("Assistant turn failed: {}", Self::error_text(response).await));
    }

    Ok(response.json().await?)
  }

  /// Opening turn of a new assistant conversation
  pub async fn greeting(&self) -> Result<Turn> {
    let response = self.client.get(self.url("/greeting-endpoint")).send().await?;

    if !response.status().is_success() {
      return Err(anyhow!("Greeting failed: HTTP {}", response.status()));
    }

    Ok(response.json().await?)
  }

  /// Run the bundled fixture import
  pub async fn import(&self) -> Result<ImportResponse> {
    let response = self.client.post(self.url("/import-endpoint")).send().await?;

    if !response.status().is_success() {
      return Err(anyhow!("Import failed: {}", Self::error_text(response).await));
    }

    Ok(response.json().await?)
  }

  /// Resolve the affiliate redirect target for a part query without following it
  pub async fn redirect_target(&self, query: &str) -> Result<String> {
    let response =
      self.client.get(self.url("/redirect-endpoint")).query(&[("q", query)]).send().await?;

    if !response.status().is_redirection() {
      return Err(anyhow!("Expected a redirect, got HTTP {}", response.status()));
    }

    response
      .headers()
      .get(reqwest::header::LOCATION)
      .and_then(|value| value.to_str().ok())
      .map(str::to_string)
      .ok_or_else(|| anyhow!("Redirect response has no Location header"))
  }

  /// Server health and configuration summary
  pub async fn status(&self) -> Result<StatusResponse> {
    let response = self.client.get(self.url("/status")).send().await?;

    if !response.status().is_success() {
      return Err(anyhow!("Server health check failed: {}", response.status()));
    }

    Ok(response.json().await?)
  }
}

/// Get the configured client (checks environment variables)
pub fn get_client() -> Result<PartsnaviClient> {
  let defaults = ClientConfig::default();
  let base_url = std::env::var("PARTSNAVI_SERVER_URL").unwrap_or(defaults.base_url);

  let timeout_secs = std::env::var("PARTSNAVI_TIMEOUT_SECS")
    .ok()
    .and_then(|value| value.parse().ok())
    .unwrap_or(defaults.timeout_secs);

  PartsnaviClient::with_config(ClientConfig { base_url, timeout_secs })
}

#[cfg(test)]
mod tests {
  use super::*;
  use mockito::{Matcher, Server};

  fn client_for(server: &Server) -> PartsnaviClient {
    PartsnaviClient::with_config(ClientConfig { base_url: server.url(), timeout_secs: 5 }).unwrap()
  }

  #[tokio::test]
  async fn test_chat_decodes_guidance_answer() {
    let mut server = Server::new_async().await;
    let _mock = server
      .mock("POST", "/chat-endpoint")
      .match_body(Matcher::Json(serde_json::json!({"query": "フィット"})))
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body(r#"{"answer": "該当する商品データが見つかりませんでした。"}"#)
      .create_async()
      .await;

    let response = client_for(&server).chat("フィット").await.unwrap();
    assert!(matches!(response, ChatResponse::Guidance(_)));
    assert_eq!(response.answer(), "該当する商品データが見つかりませんでした。");
  }

  #[tokio::test]
  async fn test_chat_surfaces_server_error_message() {
    let mut server = Server::new_async().await;
    let _mock = server
      .mock("POST", "/chat-endpoint")
      .with_status(500)
      .with_header("content-type", "application/json")
      .with_body(r#"{"error": "fitments search failed: boom"}"#)
      .create_async()
      .await;

    let error = client_for(&server).chat("アクア").await.unwrap_err();
    assert_eq!(error.to_string(), "Chat request failed: fitments search failed: boom");
  }

  #[tokio::test]
  async fn test_redirect_target_reads_location_without_following() {
    let mut server = Server::new_async().await;
    let _mock = server
      .mock("GET", "/redirect-endpoint")
      .match_query(Matcher::UrlEncoded("q".into(), "ワイパー".into()))
      .with_status(307)
      .with_header("location", "https://af.moshimo.com/af/c/click?a_id=1")
      .create_async()
      .await;

    let target = client_for(&server).redirect_target("ワイパー").await.unwrap();
    assert_eq!(target, "https://af.moshimo.com/af/c/click?a_id=1");
  }
}
