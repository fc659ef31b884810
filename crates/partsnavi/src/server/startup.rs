//! REST server startup and configuration

use anyhow::{anyhow, Result};
use axum::serve;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::catalog::VehicleCatalog;
use crate::config::{ServerConfig, StoreConfig};
use crate::import::{import_products, parse_fixture, OIL_FILTERS_JSON};
use crate::pipeline::ChatOrchestrator;
use crate::server::routing::create_router;
use crate::server::state::AppState;
use crate::services::completion::{OpenAiClient, SharedCompletionService};
use crate::services::memory_store::MemoryTableStore;
use crate::services::supabase::SupabaseStore;
use crate::services::table_store::SharedTableStore;

/// Build the shared state: one store handle and one completion handle per process
pub async fn build_state(config: &ServerConfig) -> Result<AppState> {
  let import_items = parse_fixture(OIL_FILTERS_JSON)?;

  let store: SharedTableStore = match &config.store {
    StoreConfig::Supabase(supabase) => Arc::new(SupabaseStore::new(supabase.clone())?),
    StoreConfig::Memory => {
      let store = MemoryTableStore::new();
      let seeded = import_products(&store, &import_items).await;
      info!(products = seeded, "seeded in-memory store from bundled fixture");
      Arc::new(store)
    }
  };

  if config.openai.api_key.is_empty() {
    warn!("no completion API key configured; chat requests will fail at extraction");
  }
  let completion: SharedCompletionService = Arc::new(OpenAiClient::new(config.openai.clone())?);

  let orchestrator =
    ChatOrchestrator::new(store, completion).with_completion_model(config.completion_model.clone());
  let catalog = VehicleCatalog::bundled()?.clone();

  Ok(AppState::new(orchestrator, catalog, import_items, config.affiliate.clone()))
}

/// Start the REST server
pub async fn start_server(config: ServerConfig) -> Result<()> {
  let state = build_state(&config).await?;
  info!(store = state.orchestrator.store().backend(), "starting partsnavi REST server on {}", config.bind);

  let app = create_router(state).layer(
    ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive()),
  );

  let listener = TcpListener::bind(config.bind).await?;
  info!("server listening on {}", config.bind);

  serve(listener, app).await.map_err(|e| anyhow!("Server error: {}", e))?;
  info!("server shutdown gracefully");
  Ok(())
}
