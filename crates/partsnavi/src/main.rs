use anyhow::Result;
use clap::{Parser, Subcommand};
use partsnavi::cli::commands;

#[derive(Parser)]
#[command(name = "partsnavi")]
#[command(about = "Partsnavi - Storefront Parts Assistant\nFind parts that fit your car from a free-text description")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), ", courtesy of Kernelle Software"))]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Ask which products fit a vehicle (e.g. "トヨタ アクア 2015 オイルフィルター")
  Chat {
    /// Free-text question (space-separated)
    #[arg(required = true)]
    terms: Vec<String>,
  },
  /// Start an interactive part-and-vehicle conversation
  Assist,
  /// Load the bundled oil-filter fixture into the product tables
  Import,
  /// Show the storefront link a part query redirects to
  Link {
    /// Part description (space-separated)
    #[arg(required = true)]
    terms: Vec<String>,
  },
  /// Check that the server is up and which store it uses
  Status,
}

async fn handle(command: Command) -> Result<()> {
  match command {
    Command::Chat { terms } => commands::chat(&terms).await,
    Command::Assist => commands::assist().await,
    Command::Import => commands::import().await,
    Command::Link { terms } => commands::link(&terms).await,
    Command::Status => commands::status().await,
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  handle(cli.command).await?;
  Ok(())
}
