//! Vehicle attribute extraction through the completion service

use tracing::{debug, warn};

use crate::error::CompletionError;
use crate::models::VehicleQuery;
use crate::services::completion::{ChatMessage, CompletionRequest, CompletionService};

/// Outcome of one extraction attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
  /// The model answered with a decodable record
  Extracted(VehicleQuery),
  /// The model answered with text that is not a vehicle record
  Unparsed { raw: String },
}

impl Extraction {
  /// Degrade to a query; unparsed output becomes an all-empty query
  pub fn into_query(self) -> VehicleQuery {
    match self {
      Extraction::Extracted(query) => query,
      Extraction::Unparsed { .. } => VehicleQuery::default(),
    }
  }
}

/// Instruction sent to the language model, embedding the user's text
pub fn extraction_prompt(query: &str) -> String {
  format!(
    "\n以下の日本語文章から、「メーカー名」「車種名」「年式」を抽出してください。\n\
     出力はJSON形式で:\n\
     {{\"maker\": \"...\", \"model\": \"...\", \"year\": \"....\"}} のみを返してください。\n\
     \n\
     入力文: {query}\n    "
  )
}

/// Parse the model's answer. Exactly one decode attempt is made.
pub fn parse_extraction(raw: &str) -> Extraction {
  match serde_json::from_str::<VehicleQuery>(strip_code_fence(raw)) {
    Ok(query) => Extraction::Extracted(query),
    Err(_) => Extraction::Unparsed { raw: raw.to_string() },
  }
}

fn strip_code_fence(raw: &str) -> &str {
  let trimmed = raw.trim();
  let Some(body) = trimmed.strip_prefix("```") else {
    return trimmed;
  };

  // Drop an optional language tag on the opening fence
  let body = body.split_once('\n').map_or(body, |(_, rest)| rest);
  body.strip_suffix("```").unwrap_or(body).trim()
}

/// Extracts `{maker, model, year}` from free text
pub struct VehicleExtractor<'a> {
  completion: &'a dyn CompletionService,
  model: &'a str,
}

impl<'a> VehicleExtractor<'a> {
  pub fn new(completion: &'a dyn CompletionService, model: &'a str) -> Self {
    Self { completion, model }
  }

  /// Ask the model for vehicle attributes. Only transport/service failures are errors.
  pub async fn extract(&self, query: &str) -> Result<Extraction, CompletionError> {
    let request = CompletionRequest {
      model: self.model.to_string(),
      messages: vec![ChatMessage::user(extraction_prompt(query))],
      temperature: 0.0,
    };

    let raw = self.completion.complete(request).await?.unwrap_or_else(|| "{}".to_string());
    let extraction = parse_extraction(&raw);

    match &extraction {
      Extraction::Extracted(car_info) => debug!(?car_info, "extracted vehicle attributes"),
      Extraction::Unparsed { raw } => warn!(raw = %raw, "completion output is not a vehicle record"),
    }

    Ok(extraction)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::services::completion::MockCompletionService;

  #[test]
  fn test_prompt_embeds_query_and_shape() {
    let prompt = extraction_prompt("2015年式のプリウス");
    assert!(prompt.contains("入力文: 2015年式のプリウス"));
    assert!(prompt.contains(r#"{"maker": "...", "model": "...", "year": "...."}"#));
  }

  #[test]
  fn test_parse_plain_and_fenced_json() {
    let expected = VehicleQuery { maker: "トヨタ".into(), model: "プリウス".into(), year: "2015".into() };

    assert_eq!(
      parse_extraction(r#"{"maker": "トヨタ", "model": "プリウス", "year": "2015"}"#),
      Extraction::Extracted(expected.clone())
    );
    assert_eq!(
      parse_extraction("```json\n{\"maker\": \"トヨタ\", \"model\": \"プリウス\", \"year\": 2015}\n```"),
      Extraction::Extracted(expected)
    );
  }

  #[test]
  fn test_parse_failure_is_unparsed_and_degrades_to_empty() {
    let extraction = parse_extraction("すみません、車種がわかりません");
    assert_eq!(extraction, Extraction::Unparsed { raw: "すみません、車種がわかりません".into() });
    assert_eq!(extraction.into_query(), VehicleQuery::default());
  }

  #[tokio::test]
  async fn test_extract_uses_deterministic_sampling() {
    let mut completion = MockCompletionService::new();
    completion
      .expect_complete()
      .withf(|request| {
        request.temperature == 0.0
          && request.model == "gpt-4o-mini"
          && request.messages.len() == 1
          && request.messages[0].role == "user"
          && request.messages[0].content.contains("アクア")
      })
      .times(1)
      .returning(|_| Ok(Some(r#"{"maker": "トヨタ", "model": "アクア", "year": ""}"#.to_string())));

    let extraction = VehicleExtractor::new(&completion, "gpt-4o-mini").extract("アクア").await.unwrap();
    assert_eq!(extraction.into_query().model, "アクア");
  }

  #[tokio::test]
  async fn test_missing_content_counts_as_empty_record() {
    let mut completion = MockCompletionService::new();
    completion.expect_complete().times(1).returning(|_| Ok(None));

    let extraction = VehicleExtractor::new(&completion, "gpt-4o-mini").extract("???").await.unwrap();
    assert_eq!(extraction, Extraction::Extracted(VehicleQuery::default()));
  }

  #[tokio::test]
  async fn test_service_failure_propagates() {
    let mut completion = MockCompletionService::new();
    completion
      .expect_complete()
      .times(1)
      .returning(|_| Err(CompletionError::Rejected { status: 500, message: "down".into() }));

    let result = VehicleExtractor::new(&completion, "gpt-4o-mini").extract("アクア").await;
    assert!(matches!(result, Err(CompletionError::Rejected { status: 500, .. })));
  }
}
