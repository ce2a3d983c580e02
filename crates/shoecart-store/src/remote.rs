//! # HTTP Catalog Client
//!
//! [`ProductCatalog`] and [`StockService`] over the storefront's JSON API.
//!
//! ## Endpoints
//! ```text
//! GET {base}/products/{id}  ──► 200 {"id":1,"title":"…","price":179.9,"image":"…"}
//! GET {base}/stock/{id}     ──► 200 {"id":1,"amount":5}
//!
//! 404                       ──► Ok(None)
//! other status              ──► ClientError::Status
//! timeout / connect error   ──► ClientError::Http
//! unexpected body           ──► ClientError::Parse
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shoecart_core::{Product, ProductId, StockLevel};
use tracing::{debug, instrument};
use url::Url;

use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult, ConfigError};
use crate::ports::{ProductCatalog, StockService};

/// Client for the product and stock endpoints.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: Url,
}

impl HttpCatalog {
    /// Creates a client rooted at `base_url` with a per-request timeout.
    pub fn new(base_url: Url, timeout: Duration) -> ClientResult<Self> {
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(HttpCatalog { client, base_url })
    }

    /// Creates a client from the `[api]` config section.
    pub fn from_config(api: &ApiConfig) -> ClientResult<Self> {
        let url = api.url().map_err(|e| match e {
            ConfigError::InvalidUrl(msg) => ClientError::InvalidUrl(msg),
            other => ClientError::InvalidUrl(other.to_string()),
        })?;
        Self::new(url, api.timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, resource: &str, id: ProductId) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(resource)
            .push(&id.to_string());
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ClientResult<Option<T>> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            debug!(%url, "Resource not found");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(Some(serde_json::from_slice(&body)?))
    }
}

#[async_trait]
impl ProductCatalog for HttpCatalog {
    #[instrument(skip(self), fields(product_id = %id))]
    async fn product(&self, id: ProductId) -> ClientResult<Option<Product>> {
        let url = self.endpoint("products", id)?;
        self.get_json(url).await
    }
}

#[async_trait]
impl StockService for HttpCatalog {
    #[instrument(skip(self), fields(product_id = %id))]
    async fn stock(&self, id: ProductId) -> ClientResult<Option<StockLevel>> {
        let url = self.endpoint("stock", id)?;
        let level: Option<StockLevel> = self.get_json(url).await?;
        Ok(level.map(|l| StockLevel::new(id, l.available)))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
