//! Storefront redirect, vehicle fixture and import handlers

use axum::{
  extract::{Query, State},
  http::header,
  response::{IntoResponse, Json, Redirect},
};
use tracing::info;

use crate::catalog::VEHICLES_JSON;
use crate::import::import_products;
use crate::server::state::AppState;
use crate::server::types::{ImportResponse, RedirectParams};

/// GET /redirect-endpoint - Send the browser to the matching category via the affiliate link
///
/// Always redirects. When `q` is repeated the first value wins; a missing `q`
/// is the empty string.
pub async fn redirect(State(state): State<AppState>, Query(pairs): Query<Vec<(String, String)>>) -> Redirect {
  let query = RedirectParams::from_pairs(pairs).q.unwrap_or_default();
  let target = state.affiliate.link_for(&query);

  info!(query = %query, "redirecting to storefront");
  Redirect::temporary(&target)
}

/// GET /vehicles-endpoint - The bundled vehicle fixture, verbatim
pub async fn vehicles() -> impl IntoResponse {
  ([(header::CONTENT_TYPE, "application/json")], VEHICLES_JSON)
}

/// POST /import-endpoint - Insert the bundled products and fitments
pub async fn import(State(state): State<AppState>) -> Json<ImportResponse> {
  let store = state.orchestrator.store();
  let inserted = import_products(store.as_ref(), &state.import_items).await;

  Json(ImportResponse { status: "ok".to_string(), inserted })
}
