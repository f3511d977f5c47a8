//! # Remote Source
//!
//! The backend half of every shim operation.
//!
//! ## Endpoints
//! ```text
//! ┌──────────────────────────────┬──────────────────┬──────────────────────┐
//! │ Request                      │ Body             │ Answer               │
//! ├──────────────────────────────┼──────────────────┼──────────────────────┤
//! │ GET    {api}/wines           │                  │ [Wine]  (also probe) │
//! │ POST   {api}/wines           │ NewWine          │ Wine                 │
//! │ PUT    {api}/wines/{id}      │ WinePatch        │ Wine                 │
//! │ DELETE {api}/wines/{id}      │                  │ ignored              │
//! │ GET    {api}/inventory       │                  │ [InventoryRecord]    │
//! │ PUT    {api}/inventory/{id}  │ InventoryPatch   │ InventoryRecord      │
//! │ GET    {api}/sales           │                  │ [Sale]               │
//! │ POST   {api}/sales           │ NewSale          │ Sale                 │
//! └──────────────────────────────┴──────────────────┴──────────────────────┘
//! ```
//!
//! Anything other than a 2xx is a failed call. The probe is stricter and
//! accepts 200 only.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use cellar_core::{InventoryPatch, InventoryRecord, NewSale, NewWine, Sale, Wine, WinePatch};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// A backend the shim can talk to.
///
/// [`HttpRemote`] is the real one; tests plug in doubles.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Cheap reachability check. `Ok(())` means "go ahead with the call".
    ///
    /// The caller bounds this with its own deadline.
    async fn probe(&self) -> ClientResult<()>;

    async fn list_wines(&self) -> ClientResult<Vec<Wine>>;
    async fn create_wine(&self, wine: &NewWine) -> ClientResult<Wine>;
    async fn update_wine(&self, id: i64, patch: &WinePatch) -> ClientResult<Wine>;
    async fn delete_wine(&self, id: i64) -> ClientResult<()>;

    async fn list_inventory(&self) -> ClientResult<Vec<InventoryRecord>>;
    async fn update_inventory(&self, wine_id: i64, patch: &InventoryPatch) -> ClientResult<InventoryRecord>;

    async fn list_sales(&self) -> ClientResult<Vec<Sale>>;
    async fn create_sale(&self, sale: &NewSale) -> ClientResult<Sale>;
}

// =============================================================================
// HTTP Remote
// =============================================================================

/// [`RemoteSource`] over the REST backend.
#[derive(Debug, Clone)]
pub struct HttpRemote {
    client: Client,
    api_root: Url,
}

impl HttpRemote {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(HttpRemote {
            client: Client::new(),
            api_root: config.api_root()?,
        })
    }

    /// Uses an existing `reqwest::Client`, sharing its connection pool.
    pub fn with_client(client: Client, config: &ClientConfig) -> ClientResult<Self> {
        Ok(HttpRemote {
            client,
            api_root: config.api_root()?,
        })
    }

    pub fn api_root(&self) -> &Url {
        &self.api_root
    }

    fn request(&self, method: Method, path: &str) -> ClientResult<(RequestBuilder, String)> {
        let url = self.api_root.join(path)?;
        let path = url.path().to_string();
        debug!(%method, %path, "Remote request");
        Ok((self.client.request(method, url), path))
    }

    /// Sends and insists on a 2xx.
    async fn send(request: RequestBuilder, method: &'static str, path: String) -> ClientResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Http {
                method,
                path,
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn json<T: DeserializeOwned>(request: RequestBuilder, method: &'static str, path: String) -> ClientResult<T> {
        let response = Self::send(request, method, path).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl RemoteSource for HttpRemote {
    async fn probe(&self) -> ClientResult<()> {
        let (request, _) = self.request(Method::GET, "wines")?;
        let status = request.send().await?.status();
        if status != reqwest::StatusCode::OK {
            return Err(ClientError::ProbeRejected(status.as_u16()));
        }
        Ok(())
    }

    async fn list_wines(&self) -> ClientResult<Vec<Wine>> {
        let (request, path) = self.request(Method::GET, "wines")?;
        Self::json(request, "GET", path).await
    }

    async fn create_wine(&self, wine: &NewWine) -> ClientResult<Wine> {
        let (request, path) = self.request(Method::POST, "wines")?;
        Self::json(request.json(wine), "POST", path).await
    }

    async fn update_wine(&self, id: i64, patch: &WinePatch) -> ClientResult<Wine> {
        let (request, path) = self.request(Method::PUT, &format!("wines/{}", id))?;
        Self::json(request.json(patch), "PUT", path).await
    }

    async fn delete_wine(&self, id: i64) -> ClientResult<()> {
        let (request, path) = self.request(Method::DELETE, &format!("wines/{}", id))?;
        Self::send(request, "DELETE", path).await?;
        Ok(())
    }

    async fn list_inventory(&self) -> ClientResult<Vec<InventoryRecord>> {
        let (request, path) = self.request(Method::GET, "inventory")?;
        Self::json(request, "GET", path).await
    }

    async fn update_inventory(&self, wine_id: i64, patch: &InventoryPatch) -> ClientResult<InventoryRecord> {
        let (request, path) = self.request(Method::PUT, &format!("inventory/{}", wine_id))?;
        Self::json(request.json(patch), "PUT", path).await
    }

    async fn list_sales(&self) -> ClientResult<Vec<Sale>> {
        let (request, path) = self.request(Method::GET, "sales")?;
        Self::json(request, "GET", path).await
    }

    async fn create_sale(&self, sale: &NewSale) -> ClientResult<Sale> {
        let (request, path) = self.request(Method::POST, "sales")?;
        Self::json(request.json(sale), "POST", path).await
    }
}
