//! Backend configuration.
//!
//! Loaded from environment variables with fallback to defaults.

use serde::{Deserialize, Serialize};
use std::env;

/// Backend configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// HTTP port (default: 8000)
    pub port: u16,

    /// Bind address (default: 0.0.0.0)
    pub bind_addr: String,

    /// Start from the seed dataset instead of empty collections
    /// (default: false)
    pub seed_fixtures: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            port: 8000,
            bind_addr: "0.0.0.0".to_string(),
            seed_fixtures: false,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match lookup("CELLAR_API_PORT") {
            Some(port) => port
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CELLAR_API_PORT".to_string()))?,
            None => defaults.port,
        };

        let seed_fixtures = match lookup("CELLAR_API_SEED") {
            Some(seed) => match seed.to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => return Err(ConfigError::InvalidValue("CELLAR_API_SEED".to_string())),
            },
            None => defaults.seed_fixtures,
        };

        Ok(ApiConfig {
            port,
            bind_addr: lookup("CELLAR_API_BIND").unwrap_or(defaults.bind_addr),
            seed_fixtures,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
