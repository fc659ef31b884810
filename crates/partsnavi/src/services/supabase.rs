//! Supabase (PostgREST) table store

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use std::time::Duration;

use crate::error::StoreError;
use crate::services::table_store::{Filter, Table, TableStore};

/// Connection settings for a Supabase project
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
  /// Project URL, e.g. `https://xyz.supabase.co`
  pub url: String,
  /// Anonymous (public) API key
  pub anon_key: String,
  /// Optional per-request timeout; `None` waits indefinitely
  pub timeout: Option<Duration>,
}

/// Table store talking to the PostgREST endpoint of a Supabase project
pub struct SupabaseStore {
  client: Client,
  config: SupabaseConfig,
}

impl SupabaseStore {
  pub fn new(config: SupabaseConfig) -> Result<Self, StoreError> {
    let mut builder = Client::builder();
    if let Some(timeout) = config.timeout {
      builder = builder.timeout(timeout);
    }

    Ok(Self { client: builder.build()?, config })
  }

  fn table_url(&self, table: Table) -> String {
    format!("{}/rest/v1/{}", self.config.url.trim_end_matches('/'), table.name())
  }

  fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
    request
      .header("apikey", &self.config.anon_key)
      .bearer_auth(&self.config.anon_key)
  }

  async fn rows(table: Table, response: Response) -> Result<Vec<Value>, StoreError> {
    let status = response.status();
    if !status.is_success() {
      let message = response.text().await.unwrap_or_default();
      return Err(StoreError::Rejected { table: table.to_string(), status: status.as_u16(), message });
    }

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
  }
}

/// Render a filter as a PostgREST query parameter
pub fn postgrest_param(filter: &Filter) -> (String, String) {
  match filter {
    // PostgREST accepts `*` in place of `%` so the pattern survives URL encoding
    Filter::ILike { column, pattern } => (column.clone(), format!("ilike.{}", pattern.replace('%', "*"))),
    Filter::In { column, values } => {
      let items: Vec<String> = values
        .iter()
        .map(|value| match value {
          Value::String(text) => format!("\"{}\"", text.replace('"', "\\\"")),
          other => other.to_string(),
        })
        .collect();
      (column.clone(), format!("in.({})", items.join(",")))
    }
  }
}

#[async_trait]
impl TableStore for SupabaseStore {
  async fn select(&self, table: Table, filter: &Filter) -> Result<Vec<Value>, StoreError> {
    let (column, condition) = postgrest_param(filter);
    let request = self
      .client
      .get(self.table_url(table))
      .query(&[("select", "*"), (column.as_str(), condition.as_str())]);

    let response = self.authorize(request).send().await?;
    Self::rows(table, response).await
  }

  async fn insert(&self, table: Table, row: Value) -> Result<Value, StoreError> {
    let request = self
      .client
      .post(self.table_url(table))
      .header("Prefer", "return=representation")
      .json(&row);

    let response = self.authorize(request).send().await?;
    Self::rows(table, response)
      .await?
      .into_iter()
      .next()
      .ok_or_else(|| StoreError::EmptyInsert(table.to_string()))
  }

  fn backend(&self) -> &'static str {
    "supabase"
  }
}
