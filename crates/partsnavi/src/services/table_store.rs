//! Table store abstraction for the hosted product and fitment tables
//!
//! The pipeline only ever needs three operations: a filtered select, a
//! single-row insert, and the two filter kinds the hosted store exposes
//! (`ilike` and `in`). Backends implement [`TableStore`] so the server can
//! run against Supabase in production and an in-process store in tests.

use async_trait::async_trait;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::error::StoreError;

/// Tables known to the storefront assistant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
  Products,
  Fitments,
}

impl Table {
  pub fn name(&self) -> &'static str {
    match self {
      Table::Products => "car_parts_products",
      Table::Fitments => "car_fitments",
    }
  }
}

impl fmt::Display for Table {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Row filter applied by [`TableStore::select`]
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
  /// Case-insensitive SQL `LIKE` pattern (`%` any run, `_` any char)
  ILike { column: String, pattern: String },
  /// Set membership
  In { column: String, values: Vec<Value> },
}

impl Filter {
  pub fn ilike(column: &str, pattern: impl Into<String>) -> Self {
    Filter::ILike { column: column.to_string(), pattern: pattern.into() }
  }

  pub fn is_in<I, V>(column: &str, values: I) -> Self
  where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
  {
    Filter::In { column: column.to_string(), values: values.into_iter().map(Into::into).collect() }
  }
}

/// Generic query/insert interface over the hosted tables
#[async_trait]
pub trait TableStore: Send + Sync {
  /// Return every row of `table` matching `filter`, in the store's natural order
  async fn select(&self, table: Table, filter: &Filter) -> Result<Vec<Value>, StoreError>;

  /// Insert one row and return it as stored (including generated columns)
  async fn insert(&self, table: Table, row: Value) -> Result<Value, StoreError>;

  /// Short backend label for status reporting
  fn backend(&self) -> &'static str;
}

/// Process-wide shared store handle
pub type SharedTableStore = Arc<dyn TableStore>;

/// Decode store rows into typed records
pub fn rows_as<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>, StoreError> {
  rows.into_iter().map(serde_json::from_value).collect::<Result<_, _>>().map_err(Into::into)
}

/// Compile a SQL `ILIKE` pattern: `%` is any run, `_` any single char,
/// everything else literal. Matching is anchored and case-insensitive.
pub fn ilike_regex(pattern: &str) -> Result<Regex, regex::Error> {
  let mut translated = String::from("(?is)^");
  let mut literal = String::new();

  for ch in pattern.chars() {
    let wildcard = match ch {
      '%' => ".*",
      '_' => ".",
      _ => {
        literal.push(ch);
        continue;
      }
    };
    translated.push_str(&regex::escape(&literal));
    literal.clear();
    translated.push_str(wildcard);
  }
  translated.push_str(&regex::escape(&literal));
  translated.push('$');

  Regex::new(&translated)
}

/// Match `text` against a SQL `ILIKE` pattern
pub fn ilike_matches(text: &str, pattern: &str) -> bool {
  ilike_regex(pattern).is_ok_and(|re| re.is_match(text))
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_ilike_substring_is_case_insensitive() {
    assert!(ilike_matches("Prius Alpha", "%prius%"));
    assert!(ilike_matches("プリウスPHV", "%プリウス%"));
    assert!(!ilike_matches("アクア", "%プリウス%"));
  }

  #[test]
  fn test_ilike_empty_needle_matches_everything() {
    assert!(ilike_matches("アクア", "%%"));
    assert!(ilike_matches("", "%%"));
  }

  #[test]
  fn test_ilike_anchors_and_single_char_wildcard() {
    assert!(ilike_matches("C-HR", "C_HR"));
    assert!(!ilike_matches("C-HR2", "C_HR"));
    assert!(ilike_matches("NOTE", "no%"));
    assert!(!ilike_matches("ENOTE", "no%"));
  }

  #[test]
  fn test_ilike_treats_regex_metacharacters_literally() {
    assert!(ilike_matches("プリウス(ZVW50)", "%(zvw50)%"));
    assert!(!ilike_matches("C-HR", "C.HR"));
  }

  #[test]
  fn test_rows_as_reports_shape_mismatch() {
    let rows = vec![json!({"id": 1, "product_id": "not a number"})];
    let result = rows_as::<crate::models::Fitment>(rows);
    assert!(matches!(result, Err(StoreError::Decode(_))));
  }

  #[test]
  fn test_filter_constructors() {
    assert_eq!(
      Filter::is_in("id", vec![1_i64, 2]),
      Filter::In { column: "id".into(), values: vec![json!(1), json!(2)] }
    );
    assert_eq!(Table::Fitments.to_string(), "car_fitments");
  }
}
