//! Server configuration

use std::net::SocketAddr;
use std::time::Duration;

use crate::affiliate::AffiliateConfig;
use crate::services::completion::{OpenAiConfig, DEFAULT_MODEL};
use crate::services::supabase::SupabaseConfig;

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Which table store backend the server talks to
#[derive(Debug, Clone)]
pub enum StoreConfig {
  Supabase(SupabaseConfig),
  /// In-process tables, seeded from the bundled import fixture at startup
  Memory,
}

/// Everything the server needs at startup
#[derive(Debug, Clone)]
pub struct ServerConfig {
  pub bind: SocketAddr,
  pub store: StoreConfig,
  pub openai: OpenAiConfig,
  pub completion_model: String,
  pub affiliate: AffiliateConfig,
}

impl ServerConfig {
  /// Apply one request timeout to every outbound client
  pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
    self.openai.timeout = timeout;
    if let StoreConfig::Supabase(supabase) = &mut self.store {
      supabase.timeout = timeout;
    }
    self
  }
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
      store: StoreConfig::Memory,
      openai: OpenAiConfig::default(),
      completion_model: DEFAULT_MODEL.to_string(),
      affiliate: AffiliateConfig::default(),
    }
  }
}
