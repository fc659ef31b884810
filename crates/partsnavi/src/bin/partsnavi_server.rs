//! Partsnavi REST Server
//!
//! HTTP API for the storefront parts assistant: fitment chat, affiliate
//! redirects, the vehicle fixture, fixture import and the turn-based assistant.

use anyhow::{bail, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use partsnavi::affiliate::AffiliateConfig;
use partsnavi::config::{ServerConfig, StoreConfig, DEFAULT_BIND};
use partsnavi::server::startup::start_server;
use partsnavi::services::completion::{OpenAiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use partsnavi::services::supabase::SupabaseConfig;

#[derive(Parser)]
#[command(name = "partsnavi_server")]
#[command(about = "Partsnavi REST API Server")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), ", courtesy of Kernelle Software"))]
struct Args {
  /// Server bind address
  #[arg(long, env = "PARTSNAVI_BIND", default_value = DEFAULT_BIND)]
  bind: SocketAddr,

  /// Supabase project URL
  #[arg(long, env = "SUPABASE_URL")]
  supabase_url: Option<String>,

  /// Supabase anonymous API key
  #[arg(long, env = "SUPABASE_ANON_KEY", hide_env_values = true)]
  supabase_anon_key: Option<String>,

  /// Use in-process tables seeded from the bundled fixture instead of Supabase
  #[arg(long, env = "PARTSNAVI_IN_MEMORY")]
  in_memory: bool,

  /// API key for the completion service
  #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, default_value = "")]
  openai_api_key: String,

  /// Base URL of the OpenAI-compatible completion service
  #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL)]
  openai_base_url: String,

  /// Model used for vehicle attribute extraction
  #[arg(long, env = "PARTSNAVI_COMPLETION_MODEL", default_value = DEFAULT_MODEL)]
  completion_model: String,

  /// Timeout in seconds for outbound requests (waits indefinitely when unset)
  #[arg(long, env = "PARTSNAVI_REQUEST_TIMEOUT_SECS")]
  request_timeout_secs: Option<u64>,

  /// Moshimo affiliate a_id
  #[arg(long, env = "MOSHIMO_A_ID")]
  affiliate_a_id: Option<String>,

  /// Moshimo affiliate p_id
  #[arg(long, env = "MOSHIMO_P_ID")]
  affiliate_p_id: Option<String>,

  /// Moshimo affiliate pc_id
  #[arg(long, env = "MOSHIMO_PC_ID")]
  affiliate_pc_id: Option<String>,

  /// Moshimo affiliate pl_id
  #[arg(long, env = "MOSHIMO_PL_ID")]
  affiliate_pl_id: Option<String>,

  /// Enable verbose logging
  #[arg(short, long)]
  verbose: bool,
}

impl Args {
  fn into_config(self) -> Result<ServerConfig> {
    let store = if self.in_memory {
      StoreConfig::Memory
    } else {
      match (self.supabase_url, self.supabase_anon_key) {
        (Some(url), Some(anon_key)) => StoreConfig::Supabase(SupabaseConfig { url, anon_key, timeout: None }),
        _ => bail!("SUPABASE_URL and SUPABASE_ANON_KEY are required unless --in-memory is set"),
      }
    };

    let defaults = AffiliateConfig::default();
    let affiliate = AffiliateConfig {
      a_id: self.affiliate_a_id.unwrap_or(defaults.a_id),
      p_id: self.affiliate_p_id.unwrap_or(defaults.p_id),
      pc_id: self.affiliate_pc_id.unwrap_or(defaults.pc_id),
      pl_id: self.affiliate_pl_id.unwrap_or(defaults.pl_id),
    };

    let config = ServerConfig {
      bind: self.bind,
      store,
      openai: OpenAiConfig { api_key: self.openai_api_key, base_url: self.openai_base_url, timeout: None },
      completion_model: self.completion_model,
      affiliate,
    };

    Ok(config.with_request_timeout(self.request_timeout_secs.map(Duration::from_secs)))
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
    if args.verbose {
      EnvFilter::new("debug,hyper=info,reqwest=info")
    } else {
      EnvFilter::new("partsnavi=info,tower_http=warn,warn")
    }
  });

  tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

  tracing::info!("Starting Partsnavi REST Server v{}", env!("CARGO_PKG_VERSION"));

  start_server(args.into_config()?).await?;

  Ok(())
}
