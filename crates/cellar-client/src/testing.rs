//! Scripted [`RemoteSource`] double for unit tests.
//!
//! Remote answers use id 100 for anything it "creates", so tests can tell a
//! remote result from a local one (which would get 8).

use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use cellar_core::pricing::price_sale;
use cellar_core::{fixtures, InventoryPatch, InventoryRecord, NewSale, NewWine, Sale, Wine, WinePatch};

use crate::error::{ClientError, ClientResult};
use crate::remote::RemoteSource;

pub(crate) const REMOTE_ID: i64 = 100;

#[derive(Debug, Clone, Copy)]
enum Script {
    Healthy,
    Unreachable,
    Failing,
}

#[derive(Debug, Clone)]
pub(crate) struct ScriptedRemote {
    script: Script,
    probe_delay: Option<Duration>,
    pub(crate) probes: Arc<AtomicUsize>,
    pub(crate) calls: Arc<AtomicUsize>,
}

impl ScriptedRemote {
    fn new(script: Script) -> Self {
        ScriptedRemote {
            script,
            probe_delay: None,
            probes: Arc::new(AtomicUsize::new(0)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Probe passes and every call succeeds.
    pub(crate) fn healthy() -> Self {
        Self::new(Script::Healthy)
    }

    /// Probe fails as if the connection was refused.
    pub(crate) fn unreachable() -> Self {
        Self::new(Script::Unreachable)
    }

    /// Probe passes, every call answers 500.
    pub(crate) fn failing() -> Self {
        Self::new(Script::Failing)
    }

    pub(crate) fn with_probe_delay(mut self, delay: Duration) -> Self {
        self.probe_delay = Some(delay);
        self
    }

    fn call<T>(&self, path: &str, value: impl FnOnce() -> T) -> ClientResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.script {
            Script::Failing => Err(ClientError::Http {
                method: "TEST",
                path: path.to_string(),
                status: 500,
            }),
            _ => Ok(value()),
        }
    }
}

#[async_trait]
impl RemoteSource for ScriptedRemote {
    async fn probe(&self) -> ClientResult<()> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.probe_delay {
            tokio::time::sleep(delay).await;
        }
        match self.script {
            Script::Unreachable => Err(ClientError::Request("connection refused".into())),
            _ => Ok(()),
        }
    }

    async fn list_wines(&self) -> ClientResult<Vec<Wine>> {
        self.call("/api/wines", || fixtures::wines().into_iter().take(1).collect())
    }

    async fn create_wine(&self, wine: &NewWine) -> ClientResult<Wine> {
        self.call("/api/wines", || Wine::from_new(REMOTE_ID, wine.clone()))
    }

    async fn update_wine(&self, id: i64, patch: &WinePatch) -> ClientResult<Wine> {
        self.call("/api/wines/{id}", || {
            let mut wine = fixtures::wines().remove(0);
            wine.id = id;
            patch.apply(&mut wine);
            wine
        })
    }

    async fn delete_wine(&self, _id: i64) -> ClientResult<()> {
        self.call("/api/wines/{id}", || ())
    }

    async fn list_inventory(&self) -> ClientResult<Vec<InventoryRecord>> {
        self.call("/api/inventory", || fixtures::inventory().into_iter().take(1).collect())
    }

    async fn update_inventory(&self, wine_id: i64, patch: &InventoryPatch) -> ClientResult<InventoryRecord> {
        self.call("/api/inventory/{wine_id}", || patch.clone().into_record(REMOTE_ID, wine_id))
    }

    async fn list_sales(&self) -> ClientResult<Vec<Sale>> {
        self.call("/api/sales", || fixtures::sales().into_iter().take(1).collect())
    }

    async fn create_sale(&self, sale: &NewSale) -> ClientResult<Sale> {
        self.call("/api/sales", || {
            let wines = fixtures::wines();
            let wine = wines.iter().find(|w| w.id == sale.wine_id);
            price_sale(REMOTE_ID, sale.clone(), wine, Utc::now())
        })
    }
}
