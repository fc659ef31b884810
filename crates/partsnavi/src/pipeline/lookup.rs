//! Product lookup by identifier set

use crate::error::StoreError;
use crate::models::Product;
use crate::services::table_store::{rows_as, Filter, Table, TableStore};

/// Products whose id is in `ids`. Unknown ids are dropped silently and no
/// row outside the requested set is ever returned.
pub async fn lookup_products(store: &dyn TableStore, ids: &[i64]) -> Result<Vec<Product>, StoreError> {
  if ids.is_empty() {
    return Ok(Vec::new());
  }

  let filter = Filter::is_in("id", ids.iter().copied());
  let mut products: Vec<Product> = rows_as(store.select(Table::Products, &filter).await?)?;
  products.retain(|product| ids.contains(&product.id));

  Ok(products)
}
