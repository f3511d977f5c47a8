//! # Store Lifecycle
//!
//! Construction, sharing and reset of the three collections.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Store Lifecycle                                 │
//! │                                                                         │
//! │  StoreConfig::default()  ← seed_fixtures = true                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Store::new(config)      ← fixtures or empty collections                │
//! │       │                                                                 │
//! │       │  store.clone() is cheap (Arc); every clone sees the same data   │
//! │       ▼                                                                 │
//! │  ┌──────────────────────────────────────────┐                           │
//! │  │ Collections                              │                           │
//! │  │   wines:     RwLock<Vec<Wine>>           │                           │
//! │  │   inventory: RwLock<Vec<InventoryRecord>>│                           │
//! │  │   sales:     RwLock<Vec<Sale>>           │                           │
//! │  └──────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  store.reset()           ← back to the configured starting point        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lock Order
//! Whenever more than one collection is locked, take them in the order
//! wines → inventory → sales.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use cellar_core::{fixtures, InventoryRecord, Sale, Wine};

use crate::repository::inventory::InventoryRepository;
use crate::repository::sale::SaleRepository;
use crate::repository::wine::WineRepository;

// =============================================================================
// Configuration
// =============================================================================

/// Store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Start (and reset) from the seed dataset instead of empty collections.
    /// Default: true
    pub seed_fixtures: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            seed_fixtures: true,
        }
    }
}

impl StoreConfig {
    pub fn seed_fixtures(mut self, seed: bool) -> Self {
        self.seed_fixtures = seed;
        self
    }
}

// =============================================================================
// Collections
// =============================================================================

#[derive(Debug)]
pub(crate) struct Collections {
    pub(crate) wines: RwLock<Vec<Wine>>,
    pub(crate) inventory: RwLock<Vec<InventoryRecord>>,
    pub(crate) sales: RwLock<Vec<Sale>>,
}

struct Snapshot {
    wines: Vec<Wine>,
    inventory: Vec<InventoryRecord>,
    sales: Vec<Sale>,
}

impl Snapshot {
    fn for_config(config: &StoreConfig) -> Self {
        if config.seed_fixtures {
            Snapshot {
                wines: fixtures::wines(),
                inventory: fixtures::inventory(),
                sales: fixtures::sales(),
            }
        } else {
            Snapshot {
                wines: Vec::new(),
                inventory: Vec::new(),
                sales: Vec::new(),
            }
        }
    }
}

// =============================================================================
// Store
// =============================================================================

/// Handle to one set of collections.
///
/// Clones share data. Independent stores (one per test, one per server) are
/// made by calling a constructor again.
#[derive(Debug, Clone)]
pub struct Store {
    config: StoreConfig,
    collections: Arc<Collections>,
}

impl Store {
    pub fn new(config: StoreConfig) -> Self {
        let Snapshot {
            wines,
            inventory,
            sales,
        } = Snapshot::for_config(&config);

        info!(
            seeded = config.seed_fixtures,
            wines = wines.len(),
            inventory = inventory.len(),
            sales = sales.len(),
            "Store initialized"
        );

        Store {
            config,
            collections: Arc::new(Collections {
                wines: RwLock::new(wines),
                inventory: RwLock::new(inventory),
                sales: RwLock::new(sales),
            }),
        }
    }

    /// A store holding the seed dataset.
    pub fn seeded() -> Self {
        Self::new(StoreConfig::default())
    }

    /// A store with three empty collections.
    pub fn empty() -> Self {
        Self::new(StoreConfig::default().seed_fixtures(false))
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Restores the collections to the configured starting point.
    ///
    /// All three write locks are held together, so no reader observes a
    /// half-reset store.
    pub async fn reset(&self) {
        let snapshot = Snapshot::for_config(&self.config);

        let mut wines = self.collections.wines.write().await;
        let mut inventory = self.collections.inventory.write().await;
        let mut sales = self.collections.sales.write().await;

        *wines = snapshot.wines;
        *inventory = snapshot.inventory;
        *sales = snapshot.sales;

        debug!(seeded = self.config.seed_fixtures, "Store reset");
    }

    pub fn wines(&self) -> WineRepository {
        WineRepository::new(self.collections.clone())
    }

    pub fn inventory(&self) -> InventoryRepository {
        InventoryRepository::new(self.collections.clone())
    }

    pub fn sales(&self) -> SaleRepository {
        SaleRepository::new(self.collections.clone())
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::seeded()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
