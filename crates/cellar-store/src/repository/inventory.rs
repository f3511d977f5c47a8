//! # Inventory Repository
//!
//! Inventory records are addressed by `wine_id`, not by their own id.
//!
//! ## Two Update Flavours
//! ```text
//! upsert(wine_id, patch)           update(wine_id, patch)
//! (local fallback)                 (REST backend)
//!      │                                │
//!      ▼                                ▼
//! record for wine_id?              record for wine_id?
//!   yes → merge supplied fields      yes → merge supplied fields
//!   no  → insert new record          no  → Err("Inventory item not found")
//!         (fresh id, supplied
//!          fields only)
//! ```

use std::sync::Arc;
use tracing::debug;

use cellar_core::pricing::ensure_stock;
use cellar_core::{generate_id, InventoryPatch, InventoryRecord, NewSale, ProductType};

use crate::error::{StoreError, StoreResult};
use crate::store::Collections;

/// Repository for inventory records.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    collections: Arc<Collections>,
}

impl InventoryRepository {
    pub(crate) fn new(collections: Arc<Collections>) -> Self {
        InventoryRepository { collections }
    }

    /// All inventory records, in storage order.
    pub async fn list(&self) -> Vec<InventoryRecord> {
        self.collections.inventory.read().await.clone()
    }

    /// The first record for `wine_id`, if any.
    pub async fn find_by_wine(&self, wine_id: i64) -> Option<InventoryRecord> {
        let inventory = self.collections.inventory.read().await;
        inventory.iter().find(|r| r.wine_id == wine_id).cloned()
    }

    /// Like [`find_by_wine`](Self::find_by_wine) but missing is an error.
    pub async fn get(&self, wine_id: i64) -> StoreResult<InventoryRecord> {
        self.find_by_wine(wine_id)
            .await
            .ok_or_else(|| StoreError::not_found("Inventory item", wine_id))
    }

    /// Merges `patch` into the record for `wine_id`, or inserts a new one.
    ///
    /// Only the fields the caller supplied end up in the record; nothing else
    /// from the collection leaks into it.
    pub async fn upsert(&self, wine_id: i64, patch: InventoryPatch) -> InventoryRecord {
        debug!(wine_id, ?patch, "Upserting inventory");

        let mut inventory = self.collections.inventory.write().await;
        if let Some(record) = inventory.iter_mut().find(|r| r.wine_id == wine_id) {
            patch.apply(record);
            return record.clone();
        }

        insert_into(&mut inventory, wine_id, patch)
    }

    /// Merges `patch` into an existing record; never inserts.
    pub async fn update(&self, wine_id: i64, patch: &InventoryPatch) -> StoreResult<InventoryRecord> {
        debug!(wine_id, ?patch, "Updating inventory");

        let mut inventory = self.collections.inventory.write().await;
        let record = inventory
            .iter_mut()
            .find(|r| r.wine_id == wine_id)
            .ok_or_else(|| StoreError::not_found("Inventory item", wine_id))?;

        patch.apply(record);
        Ok(record.clone())
    }

    /// Appends a new record for `wine_id` with a freshly generated id.
    pub async fn insert(&self, wine_id: i64, patch: InventoryPatch) -> InventoryRecord {
        let mut inventory = self.collections.inventory.write().await;
        insert_into(&mut inventory, wine_id, patch)
    }

    /// Removes a bottle sale's quantity from the record at the sale's location.
    ///
    /// Glass sales leave inventory untouched.
    pub async fn withdraw(&self, sale: &NewSale) -> StoreResult<()> {
        let mut inventory = self.collections.inventory.write().await;
        withdraw_from(&mut inventory, sale)
    }

    /// Drops every record for `wine_id`; returns how many were removed.
    pub async fn remove_for_wine(&self, wine_id: i64) -> usize {
        let mut inventory = self.collections.inventory.write().await;
        remove_for_wine_in(&mut inventory, wine_id)
    }
}

// =============================================================================
// Helpers over an already locked collection
// =============================================================================

pub(crate) fn insert_into(
    inventory: &mut Vec<InventoryRecord>,
    wine_id: i64,
    patch: InventoryPatch,
) -> InventoryRecord {
    let record = patch.into_record(generate_id(inventory), wine_id);
    debug!(id = record.id, wine_id, location = %record.location, "Inserted inventory record");
    inventory.push(record.clone());
    record
}

pub(crate) fn withdraw_from(inventory: &mut [InventoryRecord], sale: &NewSale) -> StoreResult<()> {
    let record = inventory
        .iter_mut()
        .find(|r| r.wine_id == sale.wine_id && r.location == sale.location);

    ensure_stock(sale, record.as_deref())?;

    if let (ProductType::Bottle, Some(record)) = (sale.product_type, record) {
        record.bottles_count = record.bottles_count.saturating_sub(sale.quantity);
        debug!(
            wine_id = sale.wine_id,
            location = %sale.location,
            remaining = record.bottles_count,
            "Withdrew bottles"
        );
    }

    Ok(())
}

pub(crate) fn remove_for_wine_in(inventory: &mut Vec<InventoryRecord>, wine_id: i64) -> usize {
    let before = inventory.len();
    inventory.retain(|r| r.wine_id != wine_id);
    before - inventory.len()
}

// =============================================================================
// Unit Tests
// =============================================================================
