//! # Data-Access Shim
//!
//! The seven operations the admin front end uses, each served by the backend
//! when it can be and by the local store otherwise.
//!
//! ## Operation Table
//! ```text
//! ┌──────────────────┬──────────────────────────┬──────────────────────────────────────┐
//! │ Operation        │ Remote                   │ Local fallback                       │
//! ├──────────────────┼──────────────────────────┼──────────────────────────────────────┤
//! │ get_wines        │ GET    /wines            │ wine collection as is                │
//! │ create_wine      │ POST   /wines            │ append with id = max + 1             │
//! │ update_wine      │ PUT    /wines/{id}       │ merge, or Err("Wine not found")      │
//! │ delete_wine      │ DELETE /wines/{id}       │ remove if present, else no-op        │
//! │ get_inventory    │ GET    /inventory        │ inventory collection as is           │
//! │ update_inventory │ PUT    /inventory/{id}   │ merge by wine_id, or insert          │
//! │ get_sales        │ GET    /sales            │ sales collection as is               │
//! │ create_sale      │ POST   /sales            │ price from wine (0 if absent), now   │
//! └──────────────────┴──────────────────────────┴──────────────────────────────────────┘
//! ```
//!
//! Remote failures never surface as `Err`; they end up in
//! [`Outcome::fallback`]. The only `Err` a caller sees is `NotFound` from
//! [`update_wine`](DataAccessShim::update_wine) on the local path.

use tracing::info;

use cellar_core::{InventoryPatch, InventoryRecord, NewSale, NewWine, Sale, Wine, WinePatch};
use cellar_store::{Store, StoreConfig};

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::remote::{HttpRemote, RemoteSource};
use crate::resolver::{Attempt, FallbackResolver, Outcome};

/// Remote-then-local access to wines, inventory and sales.
///
/// ## Usage
/// ```rust,ignore
/// let shim = DataAccessShim::from_config(&ClientConfig::load_or_default(None))?;
///
/// let created = shim.create_wine(new_wine).await?;
/// if created.used_fallback() {
///     tracing::info!(cause = ?created.cause(), "Saved locally");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DataAccessShim<R = HttpRemote> {
    resolver: FallbackResolver<R>,
    store: Store,
}

impl DataAccessShim<HttpRemote> {
    /// Builds an HTTP-backed shim with its own local store.
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;

        let remote = HttpRemote::new(config)?;
        let store = Store::new(StoreConfig::default().seed_fixtures(config.fallback.seed_fixtures));

        info!(
            api = %remote.api_root(),
            mode = %config.mode(),
            probe_timeout_ms = config.backend.probe_timeout_ms,
            "Data-access shim ready"
        );

        Ok(Self::new(FallbackResolver::from_config(remote, config), store))
    }

    /// Default configuration pointed at `base_url`.
    pub fn connect(base_url: impl Into<String>) -> ClientResult<Self> {
        Self::from_config(&ClientConfig::with_base_url(base_url))
    }
}

impl<R: RemoteSource> DataAccessShim<R> {
    pub fn new(resolver: FallbackResolver<R>, store: Store) -> Self {
        DataAccessShim { resolver, store }
    }

    /// The local store used on the fallback path.
    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn resolver(&self) -> &FallbackResolver<R> {
        &self.resolver
    }

    /// Runs the reachability probe on its own.
    pub async fn is_backend_available(&self) -> bool {
        self.resolver.is_available().await
    }

    // =========================================================================
    // Wines
    // =========================================================================

    pub async fn get_wines(&self) -> ClientResult<Outcome<Vec<Wine>>> {
        let attempt = self.resolver.attempt("get_wines", |r| r.list_wines()).await;
        Ok(match attempt {
            Attempt::Remote(wines) => Outcome::remote(wines),
            Attempt::Fallback(reason) => Outcome::local(self.store.wines().list().await, reason),
        })
    }

    pub async fn create_wine(&self, wine: NewWine) -> ClientResult<Outcome<Wine>> {
        let attempt = self.resolver.attempt("create_wine", |r| r.create_wine(&wine)).await;
        Ok(match attempt {
            Attempt::Remote(created) => Outcome::remote(created),
            Attempt::Fallback(reason) => Outcome::local(self.store.wines().create(wine).await, reason),
        })
    }

    /// ## Errors
    /// `ClientError::NotFound` ("Wine not found") when served locally and no
    /// local wine has `id`.
    pub async fn update_wine(&self, id: i64, patch: &WinePatch) -> ClientResult<Outcome<Wine>> {
        let attempt = self.resolver.attempt("update_wine", |r| r.update_wine(id, patch)).await;
        Ok(match attempt {
            Attempt::Remote(updated) => Outcome::remote(updated),
            Attempt::Fallback(reason) => Outcome::local(self.store.wines().update(id, patch).await?, reason),
        })
    }

    pub async fn delete_wine(&self, id: i64) -> ClientResult<Outcome<()>> {
        let attempt = self.resolver.attempt("delete_wine", |r| r.delete_wine(id)).await;
        Ok(match attempt {
            Attempt::Remote(()) => Outcome::remote(()),
            Attempt::Fallback(reason) => {
                self.store.wines().delete(id).await;
                Outcome::local((), reason)
            }
        })
    }

    // =========================================================================
    // Inventory
    // =========================================================================

    pub async fn get_inventory(&self) -> ClientResult<Outcome<Vec<InventoryRecord>>> {
        let attempt = self.resolver.attempt("get_inventory", |r| r.list_inventory()).await;
        Ok(match attempt {
            Attempt::Remote(inventory) => Outcome::remote(inventory),
            Attempt::Fallback(reason) => Outcome::local(self.store.inventory().list().await, reason),
        })
    }

    /// Locally, merges into the record for `wine_id` or inserts a new one
    /// carrying only the supplied fields.
    pub async fn update_inventory(&self, wine_id: i64, patch: InventoryPatch) -> ClientResult<Outcome<InventoryRecord>> {
        let attempt = self
            .resolver
            .attempt("update_inventory", |r| r.update_inventory(wine_id, &patch))
            .await;
        Ok(match attempt {
            Attempt::Remote(record) => Outcome::remote(record),
            Attempt::Fallback(reason) => Outcome::local(self.store.inventory().upsert(wine_id, patch).await, reason),
        })
    }

    // =========================================================================
    // Sales
    // =========================================================================

    pub async fn get_sales(&self) -> ClientResult<Outcome<Vec<Sale>>> {
        let attempt = self.resolver.attempt("get_sales", |r| r.list_sales()).await;
        Ok(match attempt {
            Attempt::Remote(sales) => Outcome::remote(sales),
            Attempt::Fallback(reason) => Outcome::local(self.store.sales().list().await, reason),
        })
    }

    /// Locally, the sale is priced from the referenced wine (zero if the
    /// wine is unknown) and dated now. Stock is not checked.
    pub async fn create_sale(&self, sale: NewSale) -> ClientResult<Outcome<Sale>> {
        let attempt = self.resolver.attempt("create_sale", |r| r.create_sale(&sale)).await;
        Ok(match attempt {
            Attempt::Remote(created) => Outcome::remote(created),
            Attempt::Fallback(reason) => Outcome::local(self.store.sales().record(sale).await, reason),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FallbackMode;
    use crate::resolver::FallbackReason;
    use crate::testing::{ScriptedRemote, REMOTE_ID};
    use crate::ClientError;
    use cellar_core::{fixtures, Money, ProductType, WineType, DEFAULT_LOCATION};
    use chrono::Utc;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    fn shim(remote: ScriptedRemote) -> DataAccessShim<ScriptedRemote> {
        DataAccessShim::new(
            FallbackResolver::new(remote, Duration::from_millis(2000), FallbackMode::Auto),
            Store::seeded(),
        )
    }

    fn tignanello() -> NewWine {
        NewWine {
            name: "Tignanello".to_string(),
            producer: "Antinori".to_string(),
            country: "Italy".to_string(),
            region: "Tuscany".to_string(),
            vintage_year: 2019,
            wine_type: WineType::Still,
            bottle_size_ml: 750,
            glasses_per_bottle: 5,
            alcohol_content: 14.0,
            price_bottle: Money::from_cents(12000),
            price_glass: Money::from_cents(900),
            description: String::new(),
        }
    }

    fn sale(wine_id: i64, quantity: i64) -> NewSale {
        NewSale {
            wine_id,
            product_type: ProductType::Bottle,
            quantity,
            location: "restaurant".to_string(),
            customer_name: "Grace Hopper".to_string(),
        }
    }

    // -------------------------------------------------------------------------
    // Remote path
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_remote_answers_leave_store_alone() {
        let shim = shim(ScriptedRemote::healthy());

        let created = shim.create_wine(tignanello()).await.unwrap();
        assert!(!created.used_fallback());
        assert_eq!(created.value.id, REMOTE_ID);

        let wines = shim.get_wines().await.unwrap();
        assert!(!wines.used_fallback());
        assert_eq!(wines.value.len(), 1);

        shim.delete_wine(1).await.unwrap();
        assert_eq!(shim.store().wines().list().await, fixtures::wines());
    }

    #[tokio::test]
    async fn test_remote_update_of_unknown_local_id_is_fine() {
        let shim = shim(ScriptedRemote::healthy());
        let outcome = shim.update_wine(999, &WinePatch::default()).await.unwrap();
        assert_eq!(outcome.value.id, 999);
    }

    // -------------------------------------------------------------------------
    // Unreachable backend
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_create_then_list_locally() {
        let shim = shim(ScriptedRemote::unreachable());

        let created = shim.create_wine(tignanello()).await.unwrap();
        assert!(created.used_fallback());
        assert!(matches!(created.fallback, Some(FallbackReason::Unreachable(_))));
        assert_eq!(created.value.id, 8);

        let wines = shim.get_wines().await.unwrap().into_value();
        assert_eq!(wines.len(), 8);
        assert!(wines.contains(&created.value));
    }

    #[tokio::test]
    async fn test_update_price_locally() {
        let shim = shim(ScriptedRemote::unreachable());
        let patch = WinePatch {
            price_bottle: Some(Money::from_decimal(99.50)),
            ..Default::default()
        };

        let updated = shim.update_wine(3, &patch).await.unwrap().into_value();

        let mut expected = fixtures::wines().remove(2);
        expected.price_bottle = Money::from_cents(9950);
        assert_eq!(updated, expected);
    }

    #[tokio::test]
    async fn test_update_missing_wine_rejects_on_both_fallback_paths() {
        for remote in [ScriptedRemote::unreachable(), ScriptedRemote::failing()] {
            let shim = shim(remote);
            let err = shim.update_wine(999, &WinePatch::default()).await.unwrap_err();
            assert!(matches!(err, ClientError::NotFound { entity: "Wine", id: 999 }));
            assert!(err.to_string().starts_with("Wine not found"));
        }
    }

    #[tokio::test]
    async fn test_delete_locally() {
        let shim = shim(ScriptedRemote::unreachable());

        shim.delete_wine(2).await.unwrap();
        let ids: Vec<i64> = shim.get_wines().await.unwrap().value.iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![1, 3, 4, 5, 6, 7]);

        let outcome = shim.delete_wine(2).await.unwrap();
        assert!(outcome.used_fallback());
        assert_eq!(shim.get_wines().await.unwrap().value.len(), 6);
    }

    #[tokio::test]
    async fn test_create_sale_locally() {
        let shim = shim(ScriptedRemote::unreachable());
        let before = Utc::now();

        let sold = shim.create_sale(sale(1, 2)).await.unwrap().into_value();
        assert_eq!(sold.total_amount.to_decimal(), 599.98);
        assert_eq!(sold.id, 8);
        assert!((sold.sale_date - before).num_seconds() < 5);

        let free = shim.create_sale(sale(404, 3)).await.unwrap().into_value();
        assert!(free.total_amount.is_zero());
        assert_eq!(shim.get_sales().await.unwrap().value.len(), 9);
    }

    #[tokio::test]
    async fn test_create_sale_locally_with_huge_quantity_still_resolves() {
        let shim = shim(ScriptedRemote::unreachable());

        let outcome = shim.create_sale(sale(1, i64::MAX / 100)).await.unwrap();
        assert!(outcome.used_fallback());
        assert_eq!(outcome.value.unit_price.to_decimal(), 299.99);
        assert_eq!(outcome.value.total_amount, Money::MAX);
    }

    #[tokio::test]
    async fn test_update_inventory_merges_supplied_fields_only() {
        let shim = shim(ScriptedRemote::unreachable());

        let record = shim
            .update_inventory(4, InventoryPatch::bottles(3))
            .await
            .unwrap()
            .into_value();

        assert_eq!(record.location, "restaurant");
        assert_eq!(record.bottles_count, 3);
        assert_eq!(record.id, 4);

        // Every other record is exactly as seeded.
        let inventory = shim.get_inventory().await.unwrap().into_value();
        for (got, seeded) in inventory.iter().zip(fixtures::inventory()) {
            if got.wine_id != 4 {
                assert_eq!(*got, seeded);
            }
        }
    }

    #[tokio::test]
    async fn test_update_inventory_inserts_for_unknown_wine() {
        let shim = shim(ScriptedRemote::unreachable());

        let record = shim
            .update_inventory(
                77,
                InventoryPatch {
                    location: None,
                    bottles_count: Some(6),
                },
            )
            .await
            .unwrap()
            .into_value();

        assert_eq!(record.id, 8);
        assert_eq!(record.wine_id, 77);
        assert_eq!(record.bottles_count, 6);
        assert_eq!(record.location, DEFAULT_LOCATION);
        assert_eq!(shim.get_inventory().await.unwrap().value.len(), 8);
    }

    // -------------------------------------------------------------------------
    // Remote failures
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_remote_failure_is_absorbed() {
        let remote = ScriptedRemote::failing();
        let shim = shim(remote.clone());

        let outcome = shim.get_inventory().await.unwrap();
        assert_eq!(outcome.value, fixtures::inventory());
        assert!(outcome.fallback.as_ref().is_some_and(FallbackReason::is_remote_failure));
        assert!(matches!(outcome.cause(), Some(ClientError::Http { status: 500, .. })));
        assert_eq!(remote.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_every_operation_probes() {
        let remote = ScriptedRemote::unreachable();
        let shim = shim(remote.clone());

        shim.get_wines().await.unwrap();
        shim.create_wine(tignanello()).await.unwrap();
        shim.update_wine(1, &WinePatch::default()).await.unwrap();
        shim.delete_wine(1).await.unwrap();
        shim.get_inventory().await.unwrap();
        shim.update_inventory(2, InventoryPatch::default()).await.unwrap();
        shim.get_sales().await.unwrap();
        shim.create_sale(sale(2, 1)).await.unwrap();

        assert_eq!(remote.probes.load(Ordering::SeqCst), 8);
        assert_eq!(remote.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_is_backend_available() {
        assert!(shim(ScriptedRemote::healthy()).is_backend_available().await);
        assert!(shim(ScriptedRemote::failing()).is_backend_available().await);
        assert!(!shim(ScriptedRemote::unreachable()).is_backend_available().await);
    }

    #[tokio::test]
    async fn test_offline_shim_from_config() {
        let mut config = ClientConfig::with_base_url("http://127.0.0.1:9");
        config.fallback.mode = FallbackMode::Offline;
        config.fallback.seed_fixtures = false;

        let shim = DataAccessShim::from_config(&config).unwrap();
        let wines = shim.get_wines().await.unwrap();

        assert!(wines.value.is_empty());
        assert!(matches!(wines.fallback, Some(FallbackReason::Offline)));
    }

    #[tokio::test]
    async fn test_concurrent_local_creates_do_not_collide() {
        let shim = shim(ScriptedRemote::unreachable());
        let (a, b) = tokio::join!(shim.create_wine(tignanello()), shim.create_wine(tignanello()));
        let mut ids = vec![a.unwrap().value.id, b.unwrap().value.id];
        ids.sort_unstable();
        assert_eq!(ids, vec![8, 9]);
    }
}
