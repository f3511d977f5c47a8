//! # Repository Module
//!
//! Typed access to the store's collections.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repositories over Shared Collections                 │
//! │                                                                         │
//! │  Shim fallback / API handler                                            │
//! │       │                                                                 │
//! │       │  store.wines().update(3, &patch)                                │
//! │       ▼                                                                 │
//! │  WineRepository ───────┐                                                │
//! │  InventoryRepository ──┼──► Arc<Collections> (RwLock<Vec<_>> × 3)       │
//! │  SaleRepository ───────┘                                                │
//! │                                                                         │
//! │  Every id is generated and its record appended under ONE write lock,   │
//! │  so concurrent creates cannot hand out the same id.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`WineRepository`](wine::WineRepository) - Wine CRUD, plus the backend's cascading variants
//! - [`InventoryRepository`](inventory::InventoryRepository) - Merge/insert by wine id, stock withdrawal
//! - [`SaleRepository`](sale::SaleRepository) - Recording priced sales

pub mod inventory;
pub mod sale;
pub mod wine;
