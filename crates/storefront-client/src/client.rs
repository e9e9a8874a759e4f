//! # Product Client
//!
//! Fetches one product document from the product API's slug endpoint.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  fetch_product("Sneakers12", "clear-theme", true)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  GET {base}/products/slug/clear-theme/Sneakers12?join=reviews           │
//! │       │                                                                 │
//! │       ├── 404 ─────────────► ClientError::NotFound                      │
//! │       ├── other non-2xx ───► ClientError::UnexpectedStatus              │
//! │       ▼                                                                 │
//! │  body → Product ──invalid──► ClientError::Deserialize                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use storefront_core::Product;

use crate::error::ClientError;

/// Theme segment the product API expects when none is configured.
pub const DEFAULT_THEME: &str = "clear-theme";

const USER_AGENT: &str = concat!("storefront/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the product API's slug endpoint.
///
/// One request per call; no caching and no retries. Non-2xx responses map
/// to typed errors.
#[derive(Debug, Clone)]
pub struct ProductClient {
    client: Client,
    base_url: String,
}

impl ProductClient {
    /// Creates a `ProductClient` rooted at `base_url`
    /// (e.g. `https://api.example.com/api/v1`).
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidBaseUrl`] if `base_url` does not parse.
    /// - [`ClientError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        reqwest::Url::parse(base_url).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds `{base}/products/slug/{theme}/{slug}[?join=reviews]`.
    pub fn product_url(&self, slug: &str, theme: &str, include_reviews: bool) -> String {
        let join = if include_reviews { "?join=reviews" } else { "" };
        format!("{}/products/slug/{theme}/{slug}{join}", self.base_url)
    }

    /// Fetches the product document for `slug`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotFound`] for HTTP 404.
    /// - [`ClientError::UnexpectedStatus`] for any other non-2xx status.
    /// - [`ClientError::Http`] for network, TLS or timeout failures.
    /// - [`ClientError::Deserialize`] when the body is not a product document.
    pub async fn fetch_product(
        &self,
        slug: &str,
        theme: &str,
        include_reviews: bool,
    ) -> Result<Product, ClientError> {
        let url = self.product_url(slug, theme, include_reviews);
        debug!(url = %url, "fetching product");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound { url });
        }

        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let product = serde_json::from_str::<Product>(&body).map_err(|e| ClientError::Deserialize {
            context: format!("product {slug}"),
            source: e,
        })?;

        debug!(
            product_id = %product.id,
            axes = product.axes.len(),
            variants = product.variants.len(),
            "fetched product"
        );
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_url() {
        let client =
            ProductClient::new("https://api.example.com/api/v1/", Duration::from_secs(5)).unwrap();

        assert_eq!(client.base_url(), "https://api.example.com/api/v1");
        assert_eq!(
            client.product_url("Sneakers12", DEFAULT_THEME, true),
            "https://api.example.com/api/v1/products/slug/clear-theme/Sneakers12?join=reviews"
        );
        assert_eq!(
            client.product_url("Sneakers12", "dark", false),
            "https://api.example.com/api/v1/products/slug/dark/Sneakers12"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = ProductClient::new("not a url", Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, ClientError::InvalidBaseUrl { .. }));
        assert!(!err.is_transient());
    }
}
