//! Error types shared across the parts pipeline

use thiserror::Error;

use crate::pipeline::ChatStage;

/// Failures reported by a table store backend
#[derive(Debug, Error)]
pub enum StoreError {
  #[error("store request failed: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("store rejected query on {table} ({status}): {message}")]
  Rejected { table: String, status: u16, message: String },

  #[error("store returned an unexpected row shape: {0}")]
  Decode(#[from] serde_json::Error),

  #[error("store returned no row for insert into {0}")]
  EmptyInsert(String),
}

/// Failures reported by the language-model completion service
#[derive(Debug, Error)]
pub enum CompletionError {
  #[error("completion request failed: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("completion service returned {status}: {message}")]
  Rejected { status: u16, message: String },
}

/// A chat request that failed at a specific pipeline stage
#[derive(Debug, Error)]
pub enum ChatError {
  #[error("vehicle extraction failed: {0}")]
  Extraction(#[source] CompletionError),

  #[error("fitments search failed: {0}")]
  FitmentSearch(#[source] StoreError),

  #[error("products search failed: {0}")]
  ProductSearch(#[source] StoreError),
}

impl ChatError {
  /// The stage that was running when the request failed
  pub fn stage(&self) -> ChatStage {
    match self {
      ChatError::Extraction(_) => ChatStage::Extracting,
      ChatError::FitmentSearch(_) => ChatStage::ResolvingFitment,
      ChatError::ProductSearch(_) => ChatStage::LookingUpProducts,
    }
  }
}

/// Failures loading the bundled vehicle catalog
#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("vehicle fixture is malformed: {0}")]
  Malformed(#[from] serde_json::Error),
}
