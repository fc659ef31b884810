//! Domain records for vehicles, fitments and products

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Placeholder shown for products stored without a storefront URL
pub const MISSING_URL: &str = "（URL未設定）";

/// Vehicle attributes extracted from free text.
///
/// Every field defaults to the empty string. The language model is free to
/// answer with `null`, numbers or leave a key out entirely, so decoding
/// accepts any scalar and renders it as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VehicleQuery {
  #[serde(default, deserialize_with = "lenient_string")]
  pub maker: String,
  #[serde(default, deserialize_with = "lenient_string")]
  pub model: String,
  #[serde(default, deserialize_with = "lenient_string")]
  pub year: String,
}

/// A row of the `car_fitments` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Fitment {
  pub id: i64,
  pub product_id: i64,
  #[serde(default, deserialize_with = "lenient_string")]
  pub maker: String,
  #[serde(default, deserialize_with = "lenient_string")]
  pub model: String,
  #[serde(default, deserialize_with = "lenient_string")]
  pub engine: String,
  #[serde(default, deserialize_with = "lenient_string")]
  pub year_range: String,
}

/// A row of the `car_parts_products` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Product {
  pub id: i64,
  #[serde(default, deserialize_with = "lenient_string")]
  pub product_name: String,
  #[serde(default, deserialize_with = "lenient_string")]
  pub price: String,
  #[serde(default)]
  pub url: Option<String>,
  #[serde(default)]
  pub description: Option<String>,
}

/// Insert payload for `car_parts_products`
#[derive(Debug, Clone, Serialize)]
pub struct NewProduct {
  pub product_name: String,
  pub price: String,
  pub url: String,
  pub description: Option<String>,
}

/// Insert payload for `car_fitments`
#[derive(Debug, Clone, Serialize)]
pub struct NewFitment {
  pub product_id: i64,
  pub maker: String,
  pub model: String,
  pub engine: String,
  pub year_range: String,
}

/// Product as presented to the chat client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ProductSummary {
  pub name: String,
  pub price: String,
  pub url: String,
}

impl From<&Product> for ProductSummary {
  fn from(product: &Product) -> Self {
    let url = match product.url.as_deref() {
      Some(url) if !url.is_empty() => url.to_string(),
      _ => MISSING_URL.to_string(),
    };

    Self { name: product.product_name.clone(), price: product.price.clone(), url }
  }
}

/// Successful answer of the chat pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ChatResult {
  #[serde(rename = "carInfo")]
  pub car_info: VehicleQuery,
  pub results: Vec<ProductSummary>,
  pub answer: String,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(match Value::deserialize(deserializer)? {
    Value::Null => String::new(),
    Value::String(text) => text,
    other => other.to_string(),
  })
}
