//! # cellar-core: Pure Domain Logic for Cellar
//!
//! This crate holds the wine admin domain as plain data and pure functions.
//! Nothing in here touches the network, a lock, or the file system.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cellar Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            Admin front end (wines, inventory, sales)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        cellar-client: DataAccessShim (remote, then local)       │   │
//! │  └──────────────┬──────────────────────────────────┬───────────────┘   │
//! │                 │ HTTP /api                        │ fallback           │
//! │  ┌──────────────▼──────────────┐   ┌───────────────▼───────────────┐   │
//! │  │   cellar-api (axum REST)    │   │   cellar-store (in-memory)    │   │
//! │  └──────────────┬──────────────┘   └───────────────┬───────────────┘   │
//! │                 └───────────────┬──────────────────┘                    │
//! │  ┌──────────────────────────────▼──────────────────────────────────┐   │
//! │  │              ★ cellar-core (THIS CRATE) ★                       │   │
//! │  │   types · money · ids · pricing · reports · fixtures            │   │
//! │  │   NO I/O • NO LOCKS • NO NETWORK • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Wine, InventoryRecord, Sale and their input shapes
//! - [`money`] - Integer-cent money that travels as a JSON decimal
//! - [`ids`] - `max + 1` id generation
//! - [`pricing`] - Turning a `NewSale` into a priced `Sale`
//! - [`reports`] - Sales-by-vintage and inventory-by-location aggregation
//! - [`fixtures`] - The seed dataset
//! - [`timestamp`] - ISO-8601 serde helpers for sale dates
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use cellar_core::{fixtures, generate_id};
//!
//! let wines = fixtures::wines();
//! assert_eq!(generate_id(&wines), 8);
//! ```

pub mod error;
pub mod fixtures;
pub mod ids;
pub mod money;
pub mod pricing;
pub mod reports;
pub mod timestamp;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult};
pub use ids::{generate_id, Identified};
pub use money::Money;
pub use types::*;

/// Location given to inventory records that are created without one.
///
/// Matches the backend, which opens every new wine in the warehouse.
pub const DEFAULT_LOCATION: &str = "warehouse";
