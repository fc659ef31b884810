use anyhow::Result;
use colored::*;
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

use crate::cli::client::get_client;
use crate::cli::display::{display_product, display_reply, vehicle_line, GENERIC_FAILURE};
use crate::server::types::ChatResponse;

/// Ask the chat pipeline which products fit the described vehicle
pub async fn chat(terms: &[String]) -> Result<()> {
  let query = terms.join(" ");
  let client = get_client()?;

  let response = match client.chat(&query).await {
    Ok(response) => response,
    Err(e) => {
      // Users see the generic message; the cause is kept for the exit status
      eprintln!("{}", GENERIC_FAILURE.red());
      return Err(e);
    }
  };

  match response {
    ChatResponse::Matched(success) => {
      let vehicle = vehicle_line(&success.result.car_info);
      if !vehicle.is_empty() {
        println!("{} {}", "🚗".cyan(), vehicle.blue().bold());
      }
      println!("{}", success.result.answer);
      println!();
      for product in &success.result.results {
        display_product(product);
      }
    }
    ChatResponse::Guidance(guidance) => println!("{}", guidance.answer.yellow()),
  }

  Ok(())
}

/// Next non-blank line, or `None` once input is blank or exhausted
async fn next_input<R: AsyncBufRead + Unpin>(lines: &mut Lines<R>) -> Result<Option<String>> {
  let line = lines.next_line().await?;
  Ok(line.filter(|input| !input.trim().is_empty()))
}

/// Interactive assistant: one line of input per turn, empty line or EOF to quit
pub async fn assist() -> Result<()> {
  let client = get_client()?;
  let opening = client.greeting().await?;
  display_reply(&opening.reply);

  let mut state = opening.state;
  let mut lines = BufReader::new(tokio::io::stdin()).lines();

  loop {
    println!();
    print!("{} ", format!("{} >", state.placeholder()).dimmed());
    io::stdout().flush()?;

    let Some(input) = next_input(&mut lines).await? else { break };

    // A failed turn leaves the conversation where it was
    match client.assistant_turn(state.clone(), &input).await {
      Ok(turn) => {
        println!();
        display_reply(&turn.reply);
        state = turn.state;
      }
      Err(_) => eprintln!("{}", GENERIC_FAILURE.red()),
    }
  }

  Ok(())
}

/// Load the bundled oil-filter fixture into the server's tables
pub async fn import() -> Result<()> {
  let client = get_client()?;
  let response = client.import().await?;

  println!("{} Imported {} products", "✓".green(), response.inserted.to_string().yellow());
  Ok(())
}

/// Print the storefront URL the redirect endpoint would send a browser to
pub async fn link(terms: &[String]) -> Result<()> {
  let query = terms.join(" ");
  let client = get_client()?;
  let target = client.redirect_target(&query).await?;

  println!("{target}");
  Ok(())
}

pub async fn status() -> Result<()> {
  let client = get_client()?;
  let status = client.status().await?;

  println!("{} partsnavi {} ({})", "✓".green(), status.version.cyan(), status.status);
  println!("  store:   {}", status.store.yellow());
  println!("  started: {}", status.started_at.to_rfc3339().dimmed());
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_next_input_stops_at_blank_line() {
    let mut lines = BufReader::new(&b"oil filter\nprius\n\nignored\n"[..]).lines();

    assert_eq!(next_input(&mut lines).await.unwrap().as_deref(), Some("oil filter"));
    assert_eq!(next_input(&mut lines).await.unwrap().as_deref(), Some("prius"));
    assert_eq!(next_input(&mut lines).await.unwrap(), None);
  }

  #[tokio::test]
  async fn test_next_input_stops_at_eof() {
    let mut lines = BufReader::new(&b""[..]).lines();
    assert_eq!(next_input(&mut lines).await.unwrap(), None);
  }
}
