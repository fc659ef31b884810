//! Bulk import of the bundled oil-filter fixture into the hosted tables

use serde::Deserialize;
use tracing::{error, info, warn};

use crate::models::{NewFitment, NewProduct};
use crate::services::table_store::{Table, TableStore};

/// Raw bytes of the bundled product/fitment fixture
pub const OIL_FILTERS_JSON: &str = include_str!("../data/fitment_oilfilters.json");

/// One product of the import fixture with its fitments
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureProduct {
  pub product_name: String,
  pub price: String,
  #[serde(default)]
  pub url: String,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub fitments: Vec<FixtureFitment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureFitment {
  pub maker: String,
  pub model: String,
  pub engine: String,
  pub year_range: String,
}

/// Parse an import fixture
pub fn parse_fixture(json: &str) -> Result<Vec<FixtureProduct>, serde_json::Error> {
  serde_json::from_str(json)
}

/// Insert every fixture product and its fitments.
///
/// Returns the number of products processed. A product that fails to insert
/// is skipped; a fitment that fails to insert is logged and otherwise
/// ignored, so the count says nothing about fitment rows. Running this twice
/// inserts everything twice.
pub async fn import_products(store: &dyn TableStore, items: &[FixtureProduct]) -> usize {
  let mut count = 0;

  for item in items {
    let new_product = NewProduct {
      product_name: item.product_name.clone(),
      price: item.price.clone(),
      url: item.url.clone(),
      description: item.description.clone(),
    };

    let product_id = match insert_product(store, &new_product).await {
      Ok(id) => id,
      Err(e) => {
        error!(product = %item.product_name, "product insert error: {e}");
        continue;
      }
    };

    for fit in &item.fitments {
      let new_fitment = NewFitment {
        product_id,
        maker: fit.maker.clone(),
        model: fit.model.clone(),
        engine: fit.engine.clone(),
        year_range: fit.year_range.clone(),
      };

      let row = match serde_json::to_value(&new_fitment) {
        Ok(row) => row,
        Err(e) => {
          warn!(model = %fit.model, "fitment encode error: {e}");
          continue;
        }
      };

      if let Err(e) = store.insert(Table::Fitments, row).await {
        warn!(product_id, model = %fit.model, "fitment insert error: {e}");
      }
    }

    count += 1;
  }

  info!(count, total = items.len(), "import finished");
  count
}

async fn insert_product(store: &dyn TableStore, product: &NewProduct) -> anyhow::Result<i64> {
  let stored = store.insert(Table::Products, serde_json::to_value(product)?).await?;
  stored
    .get("id")
    .and_then(serde_json::Value::as_i64)
    .ok_or_else(|| anyhow::anyhow!("inserted product has no numeric id"))
}
