//! # Fallback Resolver
//!
//! Decides, call by call, whether the remote answers or the local store does.
//!
//! ## Resolution Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      One Resolution                                     │
//! │                                                                         │
//! │  mode == offline? ──yes──► Fallback(Offline)                            │
//! │       │ no                                                              │
//! │       ▼                                                                 │
//! │  probe (bounded by probe_timeout, never cached)                         │
//! │       │ error / timeout / non-200                                       │
//! │       ├──────────────────────────► Fallback(Unreachable(cause))         │
//! │       │ ok                                                              │
//! │       ▼                                                                 │
//! │  remote call (single attempt, no deadline)                              │
//! │       │ error                                                           │
//! │       ├──────────────────────────► Fallback(RemoteFailed(cause))  warn! │
//! │       │ ok                                                              │
//! │       ▼                                                                 │
//! │  Remote(value)                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The remote call is handed over as a closure, so nothing is sent unless
//! the probe succeeds.

use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::{ClientConfig, FallbackMode};
use crate::error::{ClientError, ClientResult};
use crate::remote::RemoteSource;

// =============================================================================
// Fallback Reason
// =============================================================================

/// Why an operation was served locally.
#[derive(Debug)]
pub enum FallbackReason {
    /// The shim is configured not to use the backend.
    Offline,
    /// The probe failed, so no remote call was made.
    Unreachable(ClientError),
    /// The probe passed but the remote call itself failed.
    RemoteFailed(ClientError),
}

impl FallbackReason {
    /// The underlying error, if there was one.
    pub fn cause(&self) -> Option<&ClientError> {
        match self {
            FallbackReason::Offline => None,
            FallbackReason::Unreachable(err) | FallbackReason::RemoteFailed(err) => Some(err),
        }
    }

    pub fn is_remote_failure(&self) -> bool {
        matches!(self, FallbackReason::RemoteFailed(_))
    }
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FallbackReason::Offline => write!(f, "offline mode"),
            FallbackReason::Unreachable(err) => write!(f, "backend unreachable: {}", err),
            FallbackReason::RemoteFailed(err) => write!(f, "remote call failed: {}", err),
        }
    }
}

// =============================================================================
// Attempt / Outcome
// =============================================================================

/// What the remote stage produced.
#[derive(Debug)]
pub enum Attempt<T> {
    Remote(T),
    Fallback(FallbackReason),
}

/// A shim result together with the path that produced it.
///
/// ```rust,ignore
/// let outcome = shim.get_wines().await?;
/// if outcome.used_fallback() {
///     println!("served locally: {:?}", outcome.cause());
/// }
/// let wines = outcome.into_value();
/// ```
#[derive(Debug)]
pub struct Outcome<T> {
    pub value: T,
    /// `None` when the backend answered.
    pub fallback: Option<FallbackReason>,
}

impl<T> Outcome<T> {
    pub fn remote(value: T) -> Self {
        Outcome {
            value,
            fallback: None,
        }
    }

    pub fn local(value: T, reason: FallbackReason) -> Self {
        Outcome {
            value,
            fallback: Some(reason),
        }
    }

    pub fn used_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    pub fn cause(&self) -> Option<&ClientError> {
        self.fallback.as_ref().and_then(FallbackReason::cause)
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            value: f(self.value),
            fallback: self.fallback,
        }
    }
}

// =============================================================================
// Fallback Resolver
// =============================================================================

/// Runs the probe-then-call stage in front of every shim operation.
#[derive(Debug, Clone)]
pub struct FallbackResolver<R> {
    remote: R,
    probe_timeout: Duration,
    mode: FallbackMode,
}

impl<R: RemoteSource> FallbackResolver<R> {
    pub fn new(remote: R, probe_timeout: Duration, mode: FallbackMode) -> Self {
        FallbackResolver {
            remote,
            probe_timeout,
            mode,
        }
    }

    pub fn from_config(remote: R, config: &ClientConfig) -> Self {
        Self::new(remote, config.probe_timeout(), config.mode())
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn mode(&self) -> FallbackMode {
        self.mode
    }

    /// Probes the backend under the deadline.
    pub async fn probe(&self) -> ClientResult<()> {
        match tokio::time::timeout(self.probe_timeout, self.remote.probe()).await {
            Ok(result) => result,
            Err(_) => Err(ClientError::ProbeTimeout(self.probe_timeout.as_millis() as u64)),
        }
    }

    /// True only if the probe passes. Offline mode always answers false
    /// without touching the network.
    pub async fn is_available(&self) -> bool {
        self.mode.uses_remote() && self.probe().await.is_ok()
    }

    /// Probes, then makes at most one remote call.
    ///
    /// `call` is invoked only after a successful probe.
    pub async fn attempt<'a, T, F, Fut>(&'a self, operation: &'static str, call: F) -> Attempt<T>
    where
        F: FnOnce(&'a R) -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        if !self.mode.uses_remote() {
            debug!(operation, "Offline mode, using local data");
            return Attempt::Fallback(FallbackReason::Offline);
        }

        if let Err(err) = self.probe().await {
            debug!(operation, error = %err, "Backend not available, using local data");
            return Attempt::Fallback(FallbackReason::Unreachable(err));
        }

        match call(&self.remote).await {
            Ok(value) => {
                debug!(operation, "Served by backend");
                Attempt::Remote(value)
            }
            Err(err) => {
                warn!(operation, error = %err, "Remote call failed, falling back to local data");
                Attempt::Fallback(FallbackReason::RemoteFailed(err))
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
