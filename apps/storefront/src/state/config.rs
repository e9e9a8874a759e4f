//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`STOREFRONT_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no lock needed.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use storefront_client::DEFAULT_THEME;
use storefront_core::currency::DEFAULT_CURRENCY;
use storefront_core::variant::COLOR_AXIS;
use storefront_core::ResolverConfig;
use tracing::warn;

pub const DEFAULT_API_URL: &str = "https://api.easy-orders.net/api/v1";
pub const DEFAULT_PRODUCT_SLUG: &str = "Sneakers12";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Product API root, e.g. `https://api.example.com/api/v1`
    pub api_url: String,

    /// Theme segment of the product URL
    pub theme: String,

    /// Product the binary loads at startup
    pub product_slug: String,

    /// Whether product fetches ask for embedded reviews
    pub include_reviews: bool,

    /// Database file override; `None` uses the platform data dir
    pub db_path: Option<PathBuf>,

    /// Currency for shoppers without a saved preference
    pub default_currency: String,

    /// Axes whose selected option is lower-cased before matching variant
    /// tags (the product API stores color tags lower-case)
    pub lowercase_axes: Vec<String>,

    /// Product request timeout
    pub http_timeout_secs: u64,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            api_url: DEFAULT_API_URL.to_string(),
            theme: DEFAULT_THEME.to_string(),
            product_slug: DEFAULT_PRODUCT_SLUG.to_string(),
            include_reviews: true,
            db_path: None,
            default_currency: DEFAULT_CURRENCY.to_string(),
            lowercase_axes: vec![COLOR_AXIS.to_string()],
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `STOREFRONT_API_URL`: product API root
    /// - `STOREFRONT_THEME`: theme segment
    /// - `STOREFRONT_PRODUCT_SLUG`: product loaded at startup
    /// - `STOREFRONT_DB_PATH`: database file
    /// - `STOREFRONT_CURRENCY`: default currency
    /// - `STOREFRONT_LOWERCASE_AXES`: comma separated axis names; empty
    ///   disables lower-casing entirely
    /// - `STOREFRONT_HTTP_TIMEOUT_SECS`: request timeout in seconds
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(url) = lookup("STOREFRONT_API_URL") {
            config.api_url = url;
        }

        if let Some(theme) = lookup("STOREFRONT_THEME") {
            config.theme = theme;
        }

        if let Some(slug) = lookup("STOREFRONT_PRODUCT_SLUG") {
            config.product_slug = slug;
        }

        if let Some(path) = lookup("STOREFRONT_DB_PATH") {
            config.db_path = Some(PathBuf::from(path));
        }

        if let Some(currency) = lookup("STOREFRONT_CURRENCY") {
            config.default_currency = currency;
        }

        if let Some(axes) = lookup("STOREFRONT_LOWERCASE_AXES") {
            config.lowercase_axes = axes
                .split(',')
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(String::from)
                .collect();
        }

        if let Some(timeout) = lookup("STOREFRONT_HTTP_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) if secs > 0 => config.http_timeout_secs = secs,
                _ => warn!(value = %timeout, "Ignoring invalid STOREFRONT_HTTP_TIMEOUT_SECS"),
            }
        }

        config
    }

    /// Matching rules for the variant resolver.
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig::lowercase_axes(self.lowercase_axes.iter().cloned())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
