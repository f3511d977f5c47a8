//! # Sale Repository
//!
//! Sales are append-only. Amounts and the sale date are always computed
//! here; nothing the caller sends can set them.

use chrono::Utc;
use std::sync::Arc;
use tracing::debug;

use cellar_core::pricing::{price_sale, try_price_sale};
use cellar_core::{generate_id, NewSale, Sale};

use crate::error::{StoreError, StoreResult};
use crate::repository::inventory::withdraw_from;
use crate::store::Collections;

/// Repository for sales.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    collections: Arc<Collections>,
}

impl SaleRepository {
    pub(crate) fn new(collections: Arc<Collections>) -> Self {
        SaleRepository { collections }
    }

    pub async fn list(&self) -> Vec<Sale> {
        self.collections.sales.read().await.clone()
    }

    /// Prices and appends a sale without checking stock.
    ///
    /// A sale for an unknown wine is still recorded, at a price of zero.
    pub async fn record(&self, new: NewSale) -> Sale {
        let wines = self.collections.wines.read().await;
        let mut sales = self.collections.sales.write().await;

        let wine = wines.iter().find(|w| w.id == new.wine_id);
        let sale = price_sale(generate_id(&sales), new, wine, Utc::now());

        debug!(
            id = sale.id,
            wine_id = sale.wine_id,
            total = %sale.total_amount,
            "Recorded sale"
        );
        sales.push(sale.clone());
        sale
    }

    /// Records a sale the way the backend does: the wine must exist, and a
    /// bottle sale must be covered by stock at its location, which is then
    /// decremented.
    ///
    /// ## Errors
    /// - `StoreError::NotFound` ("Wine not found")
    /// - `StoreError::Core(InsufficientStock)` ("Not enough bottles in inventory")
    /// - `StoreError::Core(AmountOverflow)` when the total does not fit
    ///
    /// Nothing is changed when an error is returned.
    pub async fn sell(&self, new: NewSale) -> StoreResult<Sale> {
        let wines = self.collections.wines.read().await;
        let mut inventory = self.collections.inventory.write().await;
        let mut sales = self.collections.sales.write().await;

        let wine = wines
            .iter()
            .find(|w| w.id == new.wine_id)
            .ok_or_else(|| StoreError::not_found("Wine", new.wine_id))?;

        let sale = try_price_sale(generate_id(&sales), new.clone(), Some(wine), Utc::now())?;
        withdraw_from(&mut inventory, &new)?;

        debug!(
            id = sale.id,
            wine_id = sale.wine_id,
            total = %sale.total_amount,
            "Sold"
        );
        sales.push(sale.clone());
        Ok(sale)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Store, StoreError};
    use cellar_core::{CoreError, Money, NewSale, ProductType};
    use chrono::Utc;

    fn sale(wine_id: i64, product_type: ProductType, quantity: i64, location: &str) -> NewSale {
        NewSale {
            wine_id,
            product_type,
            quantity,
            location: location.to_string(),
            customer_name: "Ada Lovelace".to_string(),
        }
    }

    #[tokio::test]
    async fn test_record_prices_bottle_sale() {
        let store = Store::seeded();
        let before = Utc::now();
        let recorded = store
            .sales()
            .record(sale(1, ProductType::Bottle, 2, "restaurant"))
            .await;

        assert_eq!(recorded.id, 8);
        assert_eq!(recorded.total_amount.to_decimal(), 599.98);
        assert!(recorded.sale_date >= before);
        assert!(recorded.sale_date <= Utc::now());
        assert_eq!(store.sales().list().await.len(), 8);
    }

    #[tokio::test]
    async fn test_record_unknown_wine_is_free() {
        let store = Store::seeded();
        let recorded = store
            .sales()
            .record(sale(404, ProductType::Glass, 3, "bar"))
            .await;
        assert!(recorded.total_amount.is_zero());
        assert!(recorded.unit_price.is_zero());
    }

    #[tokio::test]
    async fn test_record_does_not_touch_inventory() {
        let store = Store::seeded();
        store
            .sales()
            .record(sale(1, ProductType::Bottle, 100, "warehouse"))
            .await;
        assert_eq!(store.inventory().get(1).await.unwrap().bottles_count, 45);
    }

    #[tokio::test]
    async fn test_sell_decrements_stock() {
        let store = Store::seeded();
        let sold = store
            .sales()
            .sell(sale(7, ProductType::Bottle, 10, "bar"))
            .await
            .unwrap();

        assert_eq!(sold.total_amount.to_string(), "199.90");
        assert_eq!(store.inventory().get(7).await.unwrap().bottles_count, 40);
    }

    #[tokio::test]
    async fn test_sell_rejects_missing_wine_and_short_stock() {
        let store = Store::seeded();

        let err = store
            .sales()
            .sell(sale(404, ProductType::Glass, 1, "bar"))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::not_found("Wine", 404));

        let err = store
            .sales()
            .sell(sale(6, ProductType::Bottle, 9, "vip room"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Not enough bottles in inventory");
        assert_eq!(store.sales().list().await.len(), 7);
    }

    #[tokio::test]
    async fn test_sell_glass_needs_no_stock() {
        let store = Store::seeded();
        let sold = store
            .sales()
            .sell(sale(2, ProductType::Glass, 2, "terrace"))
            .await
            .unwrap();
        assert_eq!(sold.unit_price.to_decimal(), 12.0);
    }

    #[tokio::test]
    async fn test_record_saturates_huge_totals() {
        let store = Store::seeded();
        let recorded = store
            .sales()
            .record(sale(1, ProductType::Glass, i64::MAX / 100, "bar"))
            .await;

        assert_eq!(recorded.unit_price.to_decimal(), 15.0);
        assert_eq!(recorded.total_amount, Money::MAX);
        assert_eq!(store.sales().list().await.len(), 8);
    }

    #[tokio::test]
    async fn test_sell_refuses_overflowing_total() {
        let store = Store::seeded();

        let err = store
            .sales()
            .sell(sale(1, ProductType::Glass, i64::MAX / 100, "bar"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::AmountOverflow { .. })));

        // A bottle sale that would overflow leaves stock alone too.
        store
            .inventory()
            .update(1, &cellar_core::InventoryPatch::bottles(i64::MAX))
            .await
            .unwrap();
        let err = store
            .sales()
            .sell(sale(1, ProductType::Bottle, i64::MAX / 100, "warehouse"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Sale total is too large");
        assert_eq!(store.inventory().get(1).await.unwrap().bottles_count, i64::MAX);
        assert_eq!(store.sales().list().await.len(), 7);
    }
}
