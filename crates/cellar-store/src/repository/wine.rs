//! # Wine Repository
//!
//! Wine CRUD over the shared collection.
//!
//! The plain operations ([`create`](WineRepository::create),
//! [`delete`](WineRepository::delete)) touch the wine collection only, which
//! is what the client's local fallback does. The backend additionally keeps
//! inventory and sales in step through
//! [`create_stocked`](WineRepository::create_stocked) and
//! [`delete_cascade`](WineRepository::delete_cascade).

use std::sync::Arc;
use tracing::debug;

use cellar_core::{generate_id, InventoryPatch, NewWine, Wine, WinePatch, DEFAULT_LOCATION};

use crate::error::{StoreError, StoreResult};
use crate::repository::inventory::{insert_into, remove_for_wine_in};
use crate::store::Collections;

/// Repository for wines.
///
/// ## Usage
/// ```rust,ignore
/// let wine = store.wines().create(new_wine).await;
/// let wine = store.wines().update(wine.id, &patch).await?;
/// store.wines().delete(wine.id).await;
/// ```
#[derive(Debug, Clone)]
pub struct WineRepository {
    collections: Arc<Collections>,
}

impl WineRepository {
    pub(crate) fn new(collections: Arc<Collections>) -> Self {
        WineRepository { collections }
    }

    pub async fn list(&self) -> Vec<Wine> {
        self.collections.wines.read().await.clone()
    }

    pub async fn get(&self, id: i64) -> StoreResult<Wine> {
        let wines = self.collections.wines.read().await;
        wines
            .iter()
            .find(|w| w.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Wine", id))
    }

    /// Appends a wine under the next id (`max + 1`, or 1 when empty).
    pub async fn create(&self, new: NewWine) -> Wine {
        let mut wines = self.collections.wines.write().await;
        let wine = Wine::from_new(generate_id(&wines), new);

        debug!(id = wine.id, name = %wine.name, "Created wine");
        wines.push(wine.clone());
        wine
    }

    /// Creates a wine and opens an empty inventory record for it in the
    /// default location.
    pub async fn create_stocked(&self, new: NewWine) -> Wine {
        let mut wines = self.collections.wines.write().await;
        let mut inventory = self.collections.inventory.write().await;

        let wine = Wine::from_new(generate_id(&wines), new);
        wines.push(wine.clone());
        insert_into(
            &mut inventory,
            wine.id,
            InventoryPatch {
                location: Some(DEFAULT_LOCATION.to_string()),
                bottles_count: Some(0),
            },
        );

        debug!(id = wine.id, name = %wine.name, "Created wine with empty stock");
        wine
    }

    /// Shallow-merges `patch` into wine `id`.
    ///
    /// ## Errors
    /// `StoreError::NotFound` ("Wine not found") when no wine has that id.
    pub async fn update(&self, id: i64, patch: &WinePatch) -> StoreResult<Wine> {
        debug!(id, "Updating wine");

        let mut wines = self.collections.wines.write().await;
        let wine = wines
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| StoreError::not_found("Wine", id))?;

        patch.apply(wine);
        Ok(wine.clone())
    }

    /// Removes wine `id`. Returns whether anything was removed; an absent id
    /// is not an error.
    pub async fn delete(&self, id: i64) -> bool {
        let mut wines = self.collections.wines.write().await;
        let before = wines.len();
        wines.retain(|w| w.id != id);

        let removed = wines.len() != before;
        debug!(id, removed, "Deleted wine");
        removed
    }

    /// Removes wine `id` together with its inventory records and sales.
    /// Returns whether the wine existed; dependents are swept either way.
    pub async fn delete_cascade(&self, id: i64) -> bool {
        let mut wines = self.collections.wines.write().await;
        let mut inventory = self.collections.inventory.write().await;
        let mut sales = self.collections.sales.write().await;

        let before = wines.len();
        wines.retain(|w| w.id != id);
        let removed = wines.len() != before;

        let stock = remove_for_wine_in(&mut inventory, id);
        let sales_before = sales.len();
        sales.retain(|s| s.wine_id != id);

        debug!(
            id,
            removed,
            inventory = stock,
            sales = sales_before - sales.len(),
            "Deleted wine and dependents"
        );
        removed
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
