//! # Cellar API
//!
//! REST backend for the wine admin panel.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cellar API Server                               │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │  /api/wines    │  │ /api/inventory │  │  /api/sales                ││
//! │  │                │  │                │  │                            ││
//! │  │ • list/create  │  │ • list         │  │ • list                     ││
//! │  │ • get/update   │  │ • get/update   │  │ • create (stock-checked)   ││
//! │  │ • delete (cas.)│  │                │  │                            ││
//! │  └────────────────┘  └────────────────┘  └────────────────────────────┘│
//! │                                                                         │
//! │  ┌────────────────────────────────┐  ┌──────────────────────────────┐  │
//! │  │  /api/reports                  │  │  /health                     │  │
//! │  │ • sales-by-vintage             │  │                              │  │
//! │  │ • inventory-by-location        │  │                              │  │
//! │  └────────────────────────────────┘  └──────────────────────────────┘  │
//! │                         │                                               │
//! │                         ▼                                               │
//! │                cellar-store Store (in memory)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `CELLAR_API_PORT` - HTTP port (default: 8000)
//! - `CELLAR_API_BIND` - Bind address (default: 0.0.0.0)
//! - `CELLAR_API_SEED` - Start from the seed dataset (default: false)

pub mod config;
pub mod error;
pub mod routes;

use std::future::Future;

use tokio::net::TcpListener;
use tracing::info;

use cellar_store::Store;

// Re-exports
pub use config::ApiConfig;
pub use error::ApiError;
pub use routes::router;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Store,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        AppState { store }
    }
}

/// Serves the API on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "Cellar API listening");
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
