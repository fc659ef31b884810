//! Chat orchestration: extraction → fitments → products → answer

use tracing::{debug, info, warn};

use crate::error::ChatError;
use crate::models::{ChatResult, ProductSummary};
use crate::pipeline::extractor::{Extraction, VehicleExtractor};
use crate::pipeline::formatter::{format_answer, NO_FITMENT_ANSWER, NO_PRODUCT_ANSWER};
use crate::pipeline::lookup::lookup_products;
use crate::pipeline::resolver::{product_ids, resolve_fitments};
use crate::pipeline::ChatStage;
use crate::services::completion::{SharedCompletionService, DEFAULT_MODEL};
use crate::services::table_store::SharedTableStore;

/// Terminal outcome of a chat request that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
  Answered(ChatResult),
  NoFitment { answer: String },
  NoProduct { answer: String },
}

impl ChatOutcome {
  pub fn answer(&self) -> &str {
    match self {
      ChatOutcome::Answered(result) => &result.answer,
      ChatOutcome::NoFitment { answer } | ChatOutcome::NoProduct { answer } => answer,
    }
  }
}

/// Composition root for the chat pipeline.
///
/// Holds the process-wide store and completion handles; every call to
/// [`ChatOrchestrator::handle`] works on its own local records only.
#[derive(Clone)]
pub struct ChatOrchestrator {
  store: SharedTableStore,
  completion: SharedCompletionService,
  completion_model: String,
}

impl ChatOrchestrator {
  pub fn new(store: SharedTableStore, completion: SharedCompletionService) -> Self {
    Self { store, completion, completion_model: DEFAULT_MODEL.to_string() }
  }

  pub fn with_completion_model(mut self, model: impl Into<String>) -> Self {
    self.completion_model = model.into();
    self
  }

  pub fn store(&self) -> &SharedTableStore {
    &self.store
  }

  /// Run one request through every stage. Stages never retry; the first
  /// failure ends the request and earlier results are dropped.
  pub async fn handle(&self, query: &str) -> Result<ChatOutcome, ChatError> {
    let mut stage = ChatStage::Received;
    debug!(%stage, "chat request received");

    stage = stage.advance();
    let extraction = VehicleExtractor::new(self.completion.as_ref(), &self.completion_model)
      .extract(query)
      .await
      .map_err(ChatError::Extraction)?;
    if let Extraction::Unparsed { .. } = extraction {
      warn!(%stage, "continuing with empty vehicle attributes");
    }
    let car_info = extraction.into_query();

    stage = stage.advance();
    debug!(%stage, model = %car_info.model, "resolving fitments");
    let fitments = resolve_fitments(self.store.as_ref(), &car_info.model)
      .await
      .map_err(ChatError::FitmentSearch)?;

    let ids = product_ids(&fitments);
    if ids.is_empty() {
      info!(model = %car_info.model, "no fitment found");
      return Ok(ChatOutcome::NoFitment { answer: NO_FITMENT_ANSWER.to_string() });
    }

    stage = stage.advance();
    debug!(%stage, count = ids.len(), "looking up products");
    let products = lookup_products(self.store.as_ref(), &ids)
      .await
      .map_err(ChatError::ProductSearch)?;

    if products.is_empty() {
      info!(model = %car_info.model, "fitments reference no existing product");
      return Ok(ChatOutcome::NoProduct { answer: NO_PRODUCT_ANSWER.to_string() });
    }

    stage = stage.advance();
    debug!(%stage, "formatting answer");
    let results: Vec<ProductSummary> = products.iter().map(ProductSummary::from).collect();
    let answer = format_answer(&car_info, &results);

    stage = stage.advance();
    info!(%stage, model = %car_info.model, products = results.len(), "chat request answered");
    Ok(ChatOutcome::Answered(ChatResult { car_info, results, answer }))
  }
}
