//! Natural-language answer for the chat endpoint

use crate::models::{ProductSummary, VehicleQuery};

/// Answer used when no fitment matches the extracted model
pub const NO_FITMENT_ANSWER: &str =
  "該当するオイルフィルターが見つかりませんでした。車種名をもう少し詳しく教えてください（例：「プリウス 2015年式」）。";

/// Answer used when fitments matched but none of their products exist
pub const NO_PRODUCT_ANSWER: &str = "該当する商品データが見つかりませんでした。";

pub fn format_answer(car_info: &VehicleQuery, products: &[ProductSummary]) -> String {
  match products {
    [] => NO_FITMENT_ANSWER.to_string(),
    [only] => format!("「{}」には {}（{}）が適合します。", car_info.model, only.name, only.price),
    many => {
      let lines: Vec<String> = many.iter().map(|p| format!("・{}（{}）", p.name, p.price)).collect();
      format!("{}に適合するオイルフィルターは以下の通りです：\n\n{}", car_info.model, lines.join("\n"))
    }
  }
}
