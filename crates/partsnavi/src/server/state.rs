//! Shared application state handed to every handler

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::affiliate::AffiliateConfig;
use crate::catalog::VehicleCatalog;
use crate::import::FixtureProduct;
use crate::pipeline::ChatOrchestrator;

/// Read-only handles built once at startup
#[derive(Clone)]
pub struct AppState {
  pub orchestrator: ChatOrchestrator,
  pub catalog: Arc<VehicleCatalog>,
  pub import_items: Arc<Vec<FixtureProduct>>,
  pub affiliate: Arc<AffiliateConfig>,
  pub started_at: DateTime<Utc>,
}

impl AppState {
  pub fn new(
    orchestrator: ChatOrchestrator,
    catalog: VehicleCatalog,
    import_items: Vec<FixtureProduct>,
    affiliate: AffiliateConfig,
  ) -> Self {
    Self {
      orchestrator,
      catalog: Arc::new(catalog),
      import_items: Arc::new(import_items),
      affiliate: Arc::new(affiliate),
      started_at: Utc::now(),
    }
  }
}
