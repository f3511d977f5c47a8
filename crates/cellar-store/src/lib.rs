//! # cellar-store: In-Memory Store for Cellar
//!
//! The explicit home of the wine, inventory and sales collections.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cellar Data Flow                                 │
//! │                                                                         │
//! │  DataAccessShim fallback          cellar-api handlers                  │
//! │          │                                │                             │
//! │          └───────────────┬────────────────┘                             │
//! │                          ▼                                              │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   cellar-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌─────────────────────┐                  │   │
//! │  │   │    Store      │    │    Repositories     │                  │   │
//! │  │   │  (store.rs)   │    │                     │                  │   │
//! │  │   │               │    │ WineRepository      │                  │   │
//! │  │   │ RwLock<Vec<>> │◄───│ InventoryRepository │                  │   │
//! │  │   │  × 3          │    │ SaleRepository      │                  │   │
//! │  │   └───────────────┘    └─────────────────────┘                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cellar_store::Store;
//!
//! let store = Store::seeded();
//! let wines = store.wines().list().await;
//! store.reset().await;
//! ```

pub mod error;
pub mod repository;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::{Store, StoreConfig};

pub use repository::inventory::InventoryRepository;
pub use repository::sale::SaleRepository;
pub use repository::wine::WineRepository;
