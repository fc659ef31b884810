//! In-process table store
//!
//! Keeps rows as JSON objects in insertion order and assigns sequential
//! `id` values, which is all the hosted store guarantees to the pipeline.

use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::services::table_store::{ilike_regex, Filter, Table, TableStore};

#[derive(Default)]
struct Tables {
  rows: HashMap<Table, Vec<Value>>,
  next_id: HashMap<Table, i64>,
}

/// Table store backed by process memory
#[derive(Default)]
pub struct MemoryTableStore {
  tables: RwLock<Tables>,
}

impl MemoryTableStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of rows currently held in `table`
  pub async fn row_count(&self, table: Table) -> usize {
    self.tables.read().await.rows.get(&table).map_or(0, Vec::len)
  }
}

fn column_text(row: &Value, column: &str) -> String {
  match row.get(column) {
    Some(Value::String(text)) => text.clone(),
    Some(Value::Null) | None => String::new(),
    Some(other) => other.to_string(),
  }
}

/// A filter prepared once per select
enum RowMatcher<'f> {
  ILike { column: &'f str, regex: Regex },
  In { column: &'f str, values: &'f [Value] },
}

impl<'f> RowMatcher<'f> {
  fn new(table: Table, filter: &'f Filter) -> Result<Self, StoreError> {
    match filter {
      Filter::ILike { column, pattern } => {
        let regex = ilike_regex(pattern).map_err(|e| StoreError::Rejected {
          table: table.to_string(),
          status: 400,
          message: e.to_string(),
        })?;
        Ok(RowMatcher::ILike { column, regex })
      }
      Filter::In { column, values } => Ok(RowMatcher::In { column, values }),
    }
  }

  fn matches(&self, row: &Value) -> bool {
    match self {
      RowMatcher::ILike { column, regex } => regex.is_match(&column_text(row, column)),
      RowMatcher::In { column, values } => {
        row.get(*column).is_some_and(|cell| values.iter().any(|value| value == cell))
      }
    }
  }
}

#[async_trait]
impl TableStore for MemoryTableStore {
  async fn select(&self, table: Table, filter: &Filter) -> Result<Vec<Value>, StoreError> {
    let matcher = RowMatcher::new(table, filter)?;
    let tables = self.tables.read().await;
    let rows = tables.rows.get(&table).map(Vec::as_slice).unwrap_or_default();

    Ok(rows.iter().filter(|row| matcher.matches(row)).cloned().collect())
  }

  async fn insert(&self, table: Table, row: Value) -> Result<Value, StoreError> {
    let Value::Object(mut fields) = row else {
      return Err(StoreError::Rejected {
        table: table.to_string(),
        status: 400,
        message: "row must be a JSON object".to_string(),
      });
    };

    let mut tables = self.tables.write().await;
    let id = {
      let next = tables.next_id.entry(table).or_insert(1);
      let id = *next;
      *next += 1;
      id
    };

    fields.insert("id".to_string(), Value::from(id));
    let stored = Value::Object(fields);
    tables.rows.entry(table).or_default().push(stored.clone());

    Ok(stored)
  }

  fn backend(&self) -> &'static str {
    "memory"
  }
}
