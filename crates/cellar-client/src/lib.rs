//! # cellar-client: Remote-then-Local Data Access
//!
//! The data-access layer of the wine admin front end. Each operation asks
//! the REST backend first and quietly serves the local store when the
//! backend is down or misbehaves.
//!
//! ## Per-Call Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  shim.update_wine(3, &patch)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  FallbackResolver ── probe GET /api/wines (≤ 2 s, status 200?) ──┐      │
//! │       │ reachable                                     unreachable │      │
//! │       ▼                                                          │      │
//! │  HttpRemote: PUT /api/wines/3 ──── error ─────┐                  │      │
//! │       │ ok                                    ▼                  ▼      │
//! │       │                            Store (cellar-store) local merge     │
//! │       ▼                                       │                         │
//! │  Outcome { value, fallback: None }   Outcome { value, fallback: Some }  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`shim`] - [`DataAccessShim`], the seven public operations
//! - [`resolver`] - Probe / remote / fallback policy and [`Outcome`]
//! - [`remote`] - [`RemoteSource`] seam and the reqwest-backed [`HttpRemote`]
//! - [`config`] - TOML + environment configuration
//! - [`error`] - Error types

pub mod config;
pub mod error;
pub mod remote;
pub mod resolver;
pub mod shim;

#[cfg(test)]
mod testing;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use config::{ClientConfig, FallbackMode};
pub use error::{ClientError, ClientResult};
pub use remote::{HttpRemote, RemoteSource};
pub use resolver::{Attempt, FallbackReason, FallbackResolver, Outcome};
pub use shim::DataAccessShim;
