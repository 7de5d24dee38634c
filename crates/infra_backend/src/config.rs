//! Client configuration

use std::path::PathBuf;

use serde::Deserialize;

/// Configuration for the backend client
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the quoting API, up to and including `/api`
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Directory for the local JSON cache; no caching when unset
    pub cache_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout_secs: 30,
            cache_dir: None,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from `QUOTE_`-prefixed environment variables
    /// (`QUOTE_BASE_URL`, `QUOTE_TIMEOUT_SECS`, `QUOTE_CACHE_DIR`),
    /// falling back to the defaults for anything unset
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("QUOTE"))
            .build()?
            .try_deserialize()
    }

    /// The quotes collection URL, without a trailing slash
    pub fn quotes_url(&self) -> String {
        format!("{}/quotes", self.base_url.trim_end_matches('/'))
    }
}
