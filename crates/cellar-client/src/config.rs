//! # Client Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CELLAR_BACKEND_URL=http://10.0.0.5:8000                            │
//! │     CELLAR_MODE=offline                                                │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/admin/client.toml (Linux)                                │
//! │     ~/Library/Application Support/com.cellar.admin/client.toml (macOS) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://127.0.0.1:8000, /api, 2000 ms probe, auto mode              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # client.toml
//! [backend]
//! base_url = "http://127.0.0.1:8000"
//! api_prefix = "/api"
//! probe_timeout_ms = 2000
//!
//! [fallback]
//! mode = "auto"        # auto | offline
//! seed_fixtures = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};

// =============================================================================
// Fallback Mode
// =============================================================================

/// Whether the shim talks to the backend at all.
///
/// ```text
/// AUTO (default)                     OFFLINE
/// ──────────────                     ───────
/// probe → remote → local fallback    local store only, no network
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackMode {
    #[default]
    Auto,
    Offline,
}

impl FallbackMode {
    pub fn uses_remote(&self) -> bool {
        matches!(self, FallbackMode::Auto)
    }
}

impl std::fmt::Display for FallbackMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FallbackMode::Auto => write!(f, "auto"),
            FallbackMode::Offline => write!(f, "offline"),
        }
    }
}

impl std::str::FromStr for FallbackMode {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" | "online" => Ok(FallbackMode::Auto),
            "offline" | "local" => Ok(FallbackMode::Offline),
            other => Err(ClientError::InvalidConfig(format!(
                "Unknown fallback mode: '{}'. Valid options: auto, offline",
                other
            ))),
        }
    }
}

// =============================================================================
// Backend Settings
// =============================================================================

/// Where the REST backend lives and how long to wait for its probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendSettings {
    /// Default: http://127.0.0.1:8000
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path prefix in front of every resource. Default: /api
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Deadline for the reachability probe. The remote call itself has none.
    /// Default: 2000
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

fn default_probe_timeout() -> u64 {
    2000
}

impl Default for BackendSettings {
    fn default() -> Self {
        BackendSettings {
            base_url: default_base_url(),
            api_prefix: default_api_prefix(),
            probe_timeout_ms: default_probe_timeout(),
        }
    }
}

// =============================================================================
// Fallback Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackSettings {
    #[serde(default)]
    pub mode: FallbackMode,

    /// Start the local store from the seed dataset. Default: true
    #[serde(default = "default_true")]
    pub seed_fixtures: bool,
}

fn default_true() -> bool {
    true
}

impl Default for FallbackSettings {
    fn default() -> Self {
        FallbackSettings {
            mode: FallbackMode::default(),
            seed_fixtures: true,
        }
    }
}

// =============================================================================
// Client Config
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub backend: BackendSettings,

    #[serde(default)]
    pub fallback: FallbackSettings,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults pointed at another backend.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.backend.base_url = base_url.into();
        config
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (client.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load client config: {}. Using defaults.", e);
            Self::default()
        })
    }

    pub fn save(&self, config_path: Option<PathBuf>) -> ClientResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Client config saved");
        Ok(())
    }

    pub fn validate(&self) -> ClientResult<()> {
        let url = Url::parse(&self.backend.base_url)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ClientError::InvalidUrl(format!(
                "Backend URL must start with http:// or https://, got: {}",
                self.backend.base_url
            )));
        }

        if !self.backend.api_prefix.starts_with('/') {
            return Err(ClientError::InvalidConfig(format!(
                "api_prefix must start with '/', got: {}",
                self.backend.api_prefix
            )));
        }

        if self.backend.probe_timeout_ms == 0 {
            return Err(ClientError::InvalidConfig(
                "probe_timeout_ms must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("CELLAR_BACKEND_URL") {
            debug!(url = %url, "Overriding backend URL from environment");
            self.backend.base_url = url;
        }

        if let Ok(prefix) = std::env::var("CELLAR_API_PREFIX") {
            self.backend.api_prefix = prefix;
        }

        if let Ok(timeout) = std::env::var("CELLAR_PROBE_TIMEOUT_MS") {
            match timeout.parse::<u64>() {
                Ok(ms) => self.backend.probe_timeout_ms = ms,
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric probe timeout in environment"),
            }
        }

        if let Ok(mode) = std::env::var("CELLAR_MODE") {
            match mode.parse() {
                Ok(parsed) => {
                    debug!(mode = %mode, "Overriding fallback mode from environment");
                    self.fallback.mode = parsed;
                }
                Err(_) => warn!(mode = %mode, "Unknown fallback mode in environment"),
            }
        }

        if let Ok(seed) = std::env::var("CELLAR_SEED_FIXTURES") {
            match seed.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.fallback.seed_fixtures = true,
                "0" | "false" | "no" => self.fallback.seed_fixtures = false,
                _ => warn!(value = %seed, "Ignoring CELLAR_SEED_FIXTURES"),
            }
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "cellar", "admin")
            .map(|dirs| dirs.config_dir().join("client.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.backend.probe_timeout_ms)
    }

    pub fn mode(&self) -> FallbackMode {
        self.fallback.mode
    }

    /// Base URL with the api prefix appended and a trailing slash, so that
    /// relative joins land under the prefix. A path on the base URL is kept.
    pub fn api_root(&self) -> ClientResult<Url> {
        let mut base = Url::parse(&self.backend.base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let prefix = self.backend.api_prefix.trim_matches('/');
        if prefix.is_empty() {
            return Ok(base);
        }
        Ok(base.join(&format!("{}/", prefix))?)
    }
}
