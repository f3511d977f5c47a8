//! # Client Error Types
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Local               │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  ProbeTimeout   │  │  NotFound               │ │
//! │  │  InvalidUrl     │  │  ProbeRejected  │  │  Store                  │ │
//! │  │  ConfigLoad...  │  │  Http           │  │                         │ │
//! │  │  ConfigSave...  │  │  Request/Decode │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  Transport errors never reach a shim caller: they are absorbed and      │
//! │  kept as the cause inside the returned Outcome. Only NotFound is        │
//! │  surfaced as Err.                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use cellar_store::StoreError;
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The reachability probe did not answer within its deadline.
    #[error("Backend probe timed out after {0} ms")]
    ProbeTimeout(u64),

    /// The probe got an answer, but not a 200.
    #[error("Backend probe answered with status {0}")]
    ProbeRejected(u16),

    /// A remote call answered with a non-2xx status.
    #[error("Backend answered {status} for {method} {path}")]
    Http {
        method: &'static str,
        path: String,
        status: u16,
    },

    /// Connection refused, reset, DNS failure and the like.
    #[error("Request failed: {0}")]
    Request(String),

    /// The backend answered 2xx with a body we could not read.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    // =========================================================================
    // Local Errors
    // =========================================================================
    /// A record the caller referenced does not exist locally.
    ///
    /// The message is exactly `"<Entity> not found"`, e.g. `"Wine not found"`.
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// Any other local store failure.
    #[error("Local store error: {0}")]
    Store(StoreError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<StoreError> for ClientError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => ClientError::NotFound { entity, id },
            other => ClientError::Store(other),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        // Status failures are built by the caller, which knows the method.
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Request(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    /// Returns true if a later call could plausibly succeed.
    ///
    /// The shim itself never retries; this is for callers that want to.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::ProbeTimeout(_) | ClientError::Request(_) => true,
            ClientError::ProbeRejected(status) | ClientError::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidConfig(_)
                | ClientError::InvalidUrl(_)
                | ClientError::ConfigLoadFailed(_)
                | ClientError::ConfigSaveFailed(_)
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
    }
}
