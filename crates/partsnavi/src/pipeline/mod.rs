//! Natural-language fitment pipeline behind the chat endpoint

use std::fmt;

pub mod extractor;
pub mod formatter;
pub mod lookup;
pub mod orchestrator;
pub mod resolver;

pub use orchestrator::{ChatOrchestrator, ChatOutcome};

/// Stages a chat request moves through, strictly in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatStage {
  Received,
  Extracting,
  ResolvingFitment,
  LookingUpProducts,
  Formatting,
  Responded,
}

impl ChatStage {
  /// The next stage; `Responded` is terminal
  pub fn advance(self) -> Self {
    match self {
      ChatStage::Received => ChatStage::Extracting,
      ChatStage::Extracting => ChatStage::ResolvingFitment,
      ChatStage::ResolvingFitment => ChatStage::LookingUpProducts,
      ChatStage::LookingUpProducts => ChatStage::Formatting,
      ChatStage::Formatting | ChatStage::Responded => ChatStage::Responded,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      ChatStage::Received => "received",
      ChatStage::Extracting => "extracting",
      ChatStage::ResolvingFitment => "resolving_fitment",
      ChatStage::LookingUpProducts => "looking_up_products",
      ChatStage::Formatting => "formatting",
      ChatStage::Responded => "responded",
    }
  }
}

impl fmt::Display for ChatStage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_stages_advance_in_order_and_stop_at_responded() {
    let mut stage = ChatStage::Received;
    let mut seen = vec![stage.as_str()];
    while stage != ChatStage::Responded {
      stage = stage.advance();
      seen.push(stage.as_str());
    }

    assert_eq!(
      seen,
      vec!["received", "extracting", "resolving_fitment", "looking_up_products", "formatting", "responded"]
    );
    assert_eq!(ChatStage::Responded.advance(), ChatStage::Responded);
  }
}
