mod common;

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use common::*;
use partsnavi::error::StoreError;
use partsnavi::import::{import_products, parse_fixture, OIL_FILTERS_JSON};
use partsnavi::pipeline::{ChatOrchestrator, ChatOutcome};
use partsnavi::services::memory_store::MemoryTableStore;
use partsnavi::services::table_store::{Filter, Table, TableStore};

/// Memory store that refuses selected rows
struct PickyStore {
  inner: MemoryTableStore,
  refuse: fn(Table, &Value) -> bool,
}

#[async_trait]
impl TableStore for PickyStore {
  async fn select(&self, table: Table, filter: &Filter) -> Result<Vec<Value>, StoreError> {
    self.inner.select(table, filter).await
  }

  async fn insert(&self, table: Table, row: Value) -> Result<Value, StoreError> {
    if (self.refuse)(table, &row) {
      return Err(StoreError::Rejected { table: table.to_string(), status: 409, message: "refused".to_string() });
    }
    self.inner.insert(table, row).await
  }

  fn backend(&self) -> &'static str {
    "picky"
  }
}

#[tokio::test]
async fn test_fitment_failures_do_not_reduce_product_count() {
  let store = PickyStore {
    inner: MemoryTableStore::new(),
    refuse: |table, row| table == Table::Fitments && row["model"] == "カローラ",
  };
  let items = parse_fixture(OIL_FILTERS_JSON).unwrap();

  assert_eq!(import_products(&store, &items).await, 4);
  assert_eq!(store.inner.row_count(Table::Products).await, 4);
  assert_eq!(store.inner.row_count(Table::Fitments).await, 11);
}

#[tokio::test]
async fn test_failed_product_skips_its_fitments() {
  let store = PickyStore {
    inner: MemoryTableStore::new(),
    refuse: |table, row| table == Table::Products && row["product_name"] == "YORO オイルフィルター OF-103",
  };
  let items = parse_fixture(OIL_FILTERS_JSON).unwrap();

  assert_eq!(import_products(&store, &items).await, 3);
  assert_eq!(store.inner.row_count(Table::Fitments).await, 9);

  let orchestrator = ChatOrchestrator::new(Arc::new(store), Arc::new(ScriptedCompletion::vehicles()));
  let outcome = orchestrator.handle("ヴォクシー").await.unwrap();
  assert!(matches!(outcome, ChatOutcome::NoFitment { .. }));
}

#[tokio::test]
async fn test_imported_fitments_link_to_their_products() {
  let orchestrator = ChatOrchestrator::new(seeded_store().await, Arc::new(ScriptedCompletion::vehicles()));

  let ChatOutcome::Answered(result) = orchestrator.handle("ヴォクシー 2018").await.unwrap() else {
    panic!("expected an answered chat");
  };
  assert_eq!(result.results.len(), 1);
  assert_eq!(result.results[0].name, "YORO オイルフィルター OF-103");
  assert_eq!(result.results[0].price, "¥1,180");
}
