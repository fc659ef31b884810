//! Fitment resolution by partial model name

use crate::error::StoreError;
use crate::models::Fitment;
use crate::services::table_store::{rows_as, Filter, Table, TableStore};

/// Fitment rows whose `model` contains `model_fragment`, case-insensitively.
///
/// An empty fragment matches every row. Rows come back in store order with
/// no limit applied.
pub async fn resolve_fitments(
  store: &dyn TableStore,
  model_fragment: &str,
) -> Result<Vec<Fitment>, StoreError> {
  let filter = Filter::ilike("model", format!("%{model_fragment}%"));
  rows_as(store.select(Table::Fitments, &filter).await?)
}

/// Product identifiers referenced by `fitments`, first occurrence order, no duplicates
pub fn product_ids(fitments: &[Fitment]) -> Vec<i64> {
  let mut ids: Vec<i64> = Vec::with_capacity(fitments.len());
  for fitment in fitments {
    if !ids.contains(&fitment.product_id) {
      ids.push(fitment.product_id);
    }
  }
  ids
}
