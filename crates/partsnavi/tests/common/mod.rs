#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, Response};
use axum::Router;
use serde_json::Value;
use std::sync::Arc;

use partsnavi::affiliate::AffiliateConfig;
use partsnavi::catalog::VehicleCatalog;
use partsnavi::error::{CompletionError, StoreError};
use partsnavi::import::{import_products, parse_fixture, OIL_FILTERS_JSON};
use partsnavi::pipeline::ChatOrchestrator;
use partsnavi::server::routing::create_router;
use partsnavi::server::state::AppState;
use partsnavi::services::completion::{CompletionRequest, CompletionService, SharedCompletionService};
use partsnavi::services::memory_store::MemoryTableStore;
use partsnavi::services::table_store::{Filter, SharedTableStore, Table, TableStore};

/// Completion service that answers from a fixed table keyed by text in the prompt
pub struct ScriptedCompletion {
  answers: Vec<(&'static str, &'static str)>,
}

impl ScriptedCompletion {
  pub fn new(answers: Vec<(&'static str, &'static str)>) -> Self {
    Self { answers }
  }

  /// Answers for the vehicles used across the route tests
  pub fn vehicles() -> Self {
    Self::new(vec![
      ("アクア", r#"{"maker": "トヨタ", "model": "アクア", "year": "2015"}"#),
      ("ヴォクシー", r#"{"maker": "トヨタ", "model": "ヴォクシー", "year": "2018"}"#),
      ("プリウス", r#"{"maker": "トヨタ", "model": "プリウス", "year": null}"#),
      ("フィット", r#"{"maker": "ホンダ", "model": "フィット", "year": "2020"}"#),
      ("なんでも", "すみません、よくわかりません。"),
    ])
  }
}

#[async_trait]
impl CompletionService for ScriptedCompletion {
  async fn complete(&self, request: CompletionRequest) -> Result<Option<String>, CompletionError> {
    let prompt = request.messages.last().map(|m| m.content.as_str()).unwrap_or_default();
    let answer = self
      .answers
      .iter()
      .find(|(needle, _)| prompt.contains(needle))
      .map(|(_, answer)| answer.to_string());

    Ok(Some(answer.unwrap_or_else(|| "{}".to_string())))
  }
}

/// Completion service that is always unreachable
pub struct DownCompletion;

#[async_trait]
impl CompletionService for DownCompletion {
  async fn complete(&self, _request: CompletionRequest) -> Result<Option<String>, CompletionError> {
    Err(CompletionError::Rejected { status: 503, message: "upstream unavailable".to_string() })
  }
}

/// Store whose queries all fail
pub struct BrokenStore;

#[async_trait]
impl TableStore for BrokenStore {
  async fn select(&self, table: Table, _filter: &Filter) -> Result<Vec<Value>, StoreError> {
    Err(StoreError::Rejected { table: table.to_string(), status: 500, message: "connection reset".to_string() })
  }

  async fn insert(&self, table: Table, _row: Value) -> Result<Value, StoreError> {
    Err(StoreError::Rejected { table: table.to_string(), status: 500, message: "connection reset".to_string() })
  }

  fn backend(&self) -> &'static str {
    "broken"
  }
}

/// Memory store loaded with the bundled oil-filter fixture
pub async fn seeded_store() -> Arc<MemoryTableStore> {
  let store = Arc::new(MemoryTableStore::new());
  let items = parse_fixture(OIL_FILTERS_JSON).unwrap();
  import_products(store.as_ref(), &items).await;
  store
}

pub fn app_with(store: SharedTableStore, completion: SharedCompletionService) -> Router {
  let orchestrator = ChatOrchestrator::new(store, completion);
  let catalog = VehicleCatalog::bundled().unwrap().clone();
  let items = parse_fixture(OIL_FILTERS_JSON).unwrap();

  create_router(AppState::new(orchestrator, catalog, items, AffiliateConfig::default()))
}

/// Router over a seeded memory store and the scripted vehicle answers
pub async fn seeded_app() -> Router {
  app_with(seeded_store().await, Arc::new(ScriptedCompletion::vehicles()))
}

pub fn json_post(uri: &str, body: &str) -> Request<Body> {
  Request::builder()
    .method("POST")
    .uri(uri)
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from(body.to_string()))
    .unwrap()
}

/// POST without any `Content-Type` header
pub fn bare_post(uri: &str, body: &str) -> Request<Body> {
  Request::builder().method("POST").uri(uri).body(Body::from(body.to_string())).unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
  Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
  let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
  serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
  let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
  String::from_utf8(bytes.to_vec()).unwrap()
}
