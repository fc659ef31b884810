//! Display formatting utilities for CLI output

use colored::*;

use crate::catalog::assistant::{AssistantReply, SuggestedPart};
use crate::models::{ProductSummary, VehicleQuery};

/// Printed in place of any underlying failure
pub const GENERIC_FAILURE: &str = "エラーが発生しました。";

/// One-line summary of the extracted vehicle, skipping blank fields
pub fn vehicle_line(car_info: &VehicleQuery) -> String {
  [car_info.maker.as_str(), car_info.model.as_str(), car_info.year.as_str()]
    .into_iter()
    .filter(|field| !field.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}

pub fn display_product(product: &ProductSummary) {
  println!("  {} {} {}", "🔧".yellow(), product.name.bold(), product.price.green());
  println!("     {}", product.url.dimmed());
}

fn display_part(part: &SuggestedPart) {
  println!("  {} {} ({})", "🔧".yellow(), part.part.name.bold(), part.part.category.cyan());
  if !part.part.part_numbers.is_empty() {
    println!("     品番: {}", part.part.part_numbers.join(", "));
  }
  if !part.part.description.is_empty() {
    println!("     {}", part.part.description.dimmed());
  }
  println!("     {}", part.link.blue());
}

/// Print an assistant reply with any suggested parts below it
pub fn display_reply(reply: &AssistantReply) {
  println!("{}", reply.content);
  if !reply.parts.is_empty() {
    println!();
    for part in &reply.parts {
      display_part(part);
    }
  }
}
