//! # Catalog
//!
//! Product and stock lookups against the remote storefront API.
//!
//! ```text
//! GET {base}/products/{id}  →  { "id", "title", "price", "image" }
//! GET {base}/stock/{id}     →  { "id", "amount" }
//! ```
//!
//! Requests have no timeout and are never retried; a hung request keeps the
//! calling cart operation pending.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use cart_core::{Product, ProductId, Stock};

use crate::error::CatalogError;

/// Source of product and stock records.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetches the product record for `id`.
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError>;

    /// Fetches the current stock for `id`.
    async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError>;
}

/// [`Catalog`] backed by the storefront's JSON API.
///
/// ## Usage
/// ```rust,ignore
/// let catalog = HttpCatalog::new("http://localhost:3333")?;
/// let stock = catalog.stock(3).await?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalog {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidUrl`] unless `base_url` is an
    /// `http(s)://` URL, or [`CatalogError::Http`] if the client can't be
    /// built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, CatalogError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(CatalogError::InvalidUrl(base_url));
        }

        let client = reqwest::Client::builder().build()?;

        Ok(HttpCatalog { client, base_url })
    }

    /// The API root, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        id: ProductId,
    ) -> Result<T, CatalogError> {
        let url = format!("{}/{}/{}", self.base_url, resource, id);
        debug!(url = %url, "Catalog request");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound { resource, id });
        }

        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url,
            });
        }

        response
            .json()
            .await
            .map_err(|e| CatalogError::Decode(e.to_string()))
    }
}

#[async_trait]
impl Catalog for HttpCatalog {
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.get("products", id).await
    }

    async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        self.get("stock", id).await
    }
}
