//! Turn-based parts assistant over the static vehicle catalog
//!
//! The conversation is an explicit state value: callers pass the current
//! [`AssistantState`] in with the user's input and get the next state back
//! alongside the reply. Nothing is retained between calls.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::affiliate::redirect_path;
use crate::catalog::{CommonPart, Vehicle, VehicleCatalog};

pub const GREETING: &str =
  "こんにちは！🚗 何をお探しですか？\n\n例：オイルフィルター、エアフィルター、ブレーキパッドなど";

pub const RESET_PROMPT: &str = "何をお探しですか？\n\n例：オイルフィルター、エアフィルター、ブレーキパッドなど";

/// Where the conversation currently stands
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum AssistantState {
  #[default]
  AskingPart,
  AskingVehicle {
    part: String,
  },
  ShowingResults {
    part: String,
    vehicle: String,
  },
}

impl AssistantState {
  /// Input hint for the next turn
  pub fn placeholder(&self) -> &'static str {
    match self {
      AssistantState::AskingPart => "部品名を入力してください（例：オイルフィルター、エアフィルター）",
      AssistantState::AskingVehicle { .. } => "車種名を入力してください（例：プリウス、アクア、ヴォクシー）",
      AssistantState::ShowingResults { .. } => "何かお手伝いできることはありますか？",
    }
  }
}

/// A matched part with its storefront search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SuggestedPart {
  #[serde(flatten)]
  pub part: CommonPart,
  /// Free text handed to the storefront redirect
  pub search_query: String,
  /// Local redirect endpoint path for `search_query`
  pub link: String,
}

/// Assistant message for one turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AssistantReply {
  pub content: String,
  #[serde(default)]
  pub parts: Vec<SuggestedPart>,
}

impl AssistantReply {
  fn text(content: String) -> Self {
    Self { content, parts: Vec::new() }
  }
}

/// Result of one turn: the state to hand back next time, and the reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Turn {
  pub state: AssistantState,
  pub reply: AssistantReply,
}

/// The turn shown before the user has said anything
pub fn greeting() -> Turn {
  Turn { state: AssistantState::AskingPart, reply: AssistantReply::text(GREETING.to_string()) }
}

/// Advance the conversation by one user message
pub fn handle_turn(state: AssistantState, input: &str, catalog: &VehicleCatalog) -> Turn {
  let input = input.trim();

  match state {
    AssistantState::AskingPart => Turn {
      state: AssistantState::AskingVehicle { part: input.to_string() },
      reply: AssistantReply::text(format!(
        "「{input}」ですね！\n\nどんな車ですか？\n\n例：プリウス、アクア、ヴォクシーなど"
      )),
    },
    AssistantState::AskingVehicle { part } => {
      let reply = match find_parts(catalog, input, &part) {
        Some((vehicle, parts)) if !parts.is_empty() => suggest(vehicle, &part, parts),
        _ => AssistantReply::text(format!(
          "申し訳ございません。「{input}」の「{part}」が見つかりませんでした。\n\n別の車種名や部品名をお試しください。"
        )),
      };

      Turn { state: AssistantState::ShowingResults { part, vehicle: input.to_string() }, reply }
    }
    AssistantState::ShowingResults { .. } => Turn {
      state: AssistantState::AskingPart,
      reply: AssistantReply::text(RESET_PROMPT.to_string()),
    },
  }
}

fn find_parts<'c>(catalog: &'c VehicleCatalog, vehicle_name: &str, part_name: &str) -> Option<(&'c Vehicle, Vec<CommonPart>)> {
  let vehicle = catalog.find_by_model(vehicle_name).or_else(|| catalog.find_by_code(vehicle_name))?;
  Some((vehicle, vehicle.parts_matching(part_name)))
}

fn suggest(vehicle: &Vehicle, part_name: &str, parts: Vec<CommonPart>) -> AssistantReply {
  let label = vehicle.label();
  let parts = parts
    .into_iter()
    .map(|part| {
      let search_query = format!("{label} {}", part.name);
      let link = redirect_path(&search_query);
      SuggestedPart { part, search_query, link }
    })
    .collect();

  AssistantReply {
    content: format!("「{label}」の「{part_name}」ですね！\n\nお車に合う部品をご紹介します："),
    parts,
  }
}
