//! Static vehicle catalog bundled with the service

use once_cell::sync::OnceCell;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

pub mod assistant;

/// Raw bytes of the bundled vehicle fixture
pub const VEHICLES_JSON: &str = include_str!("../../data/vehicles.json");

static BUNDLED: OnceCell<VehicleCatalog> = OnceCell::new();

/// A part commonly replaced on a vehicle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommonPart {
  pub name: String,
  pub category: String,
  pub part_numbers: Vec<String>,
  pub description: String,
}

/// A vehicle generation with its commonly replaced parts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
  pub model: String,
  pub generation: String,
  pub year_range: String,
  pub engine_code: String,
  pub body_code: String,
  pub common_parts: Vec<CommonPart>,
}

impl Vehicle {
  /// Display label, e.g. `プリウス 4代目（2015-2022）`
  pub fn label(&self) -> String {
    format!("{} {}（{}）", self.model, self.generation, self.year_range)
  }

  /// Parts whose name or description contains `part_name`, case-insensitively
  pub fn parts_matching(&self, part_name: &str) -> Vec<CommonPart> {
    let needle = part_name.to_lowercase();
    self
      .common_parts
      .iter()
      .filter(|part| {
        part.name.to_lowercase().contains(&needle) || part.description.to_lowercase().contains(&needle)
      })
      .cloned()
      .collect()
  }
}

/// The vehicle fixture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VehicleCatalog {
  pub vehicles: Vec<Vehicle>,
}

impl VehicleCatalog {
  pub fn from_json(json: &str) -> Result<Self, CatalogError> {
    Ok(serde_json::from_str(json)?)
  }

  /// The bundled catalog, parsed once per process
  pub fn bundled() -> Result<&'static VehicleCatalog, CatalogError> {
    BUNDLED.get_or_try_init(|| Self::from_json(VEHICLES_JSON))
  }

  /// First vehicle whose model contains `name`, case-insensitively
  pub fn find_by_model(&self, name: &str) -> Option<&Vehicle> {
    let needle = name.to_lowercase();
    self.vehicles.iter().find(|v| v.model.to_lowercase().contains(&needle))
  }

  /// First vehicle whose engine code, body code or model contains `code`
  pub fn find_by_code(&self, code: &str) -> Option<&Vehicle> {
    let needle = code.to_lowercase();
    self.vehicles.iter().find(|v| {
      v.engine_code.to_lowercase().contains(&needle)
        || v.body_code.to_lowercase().contains(&needle)
        || v.model.to_lowercase().contains(&needle)
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_bundled_catalog_parses() {
    let catalog = VehicleCatalog::bundled().unwrap();
    assert!(!catalog.vehicles.is_empty());
    assert!(std::ptr::eq(catalog, VehicleCatalog::bundled().unwrap()));
  }

  #[test]
  fn test_find_by_model_is_case_insensitive_substring() {
    let catalog = VehicleCatalog::bundled().unwrap();

    assert_eq!(catalog.find_by_model("アクア").map(|v| v.body_code.as_str()), Some("NHP10"));
    // Several generations match; the first in fixture order is returned
    assert_eq!(catalog.find_by_model("プリウス").map(|v| v.body_code.as_str()), Some("ZVW50"));
    assert!(catalog.find_by_model("フィット").is_none());
  }

  #[test]
  fn test_find_by_code_checks_engine_and_body_codes() {
    let catalog = VehicleCatalog::bundled().unwrap();

    assert_eq!(catalog.find_by_code("zvw30").map(|v| v.generation.as_str()), Some("3代目"));
    assert_eq!(catalog.find_by_code("3ZR").map(|v| v.model.as_str()), Some("ヴォクシー"));
  }

  #[test]
  fn test_parts_matching_checks_name_and_description() {
    let catalog = VehicleCatalog::bundled().unwrap();
    let voxy = catalog.find_by_model("ヴォクシー").unwrap();

    let by_name: Vec<_> = voxy.parts_matching("バッテリー").into_iter().map(|p| p.name).collect();
    assert_eq!(by_name, vec!["バッテリー"]);

    let prius = catalog.find_by_code("ZVW30").unwrap();
    let by_description: Vec<_> = prius.parts_matching("花粉").into_iter().map(|p| p.name).collect();
    assert_eq!(by_description, vec!["キャビンフィルター"]);
  }

  #[test]
  fn test_malformed_fixture_is_reported() {
    assert!(matches!(VehicleCatalog::from_json("{\"vehicles\": 3}"), Err(CatalogError::Malformed(_))));
  }
}
