//! # storefront-client: Product API Client
//!
//! Fetches the product document the details page renders.
//!
//! ```text
//!   apps/storefront                        product API
//!   ───────────────                        ───────────
//!   load_product("Sneakers12")
//!        │
//!        ▼
//!   ProductClient::fetch_product ──GET──► /products/slug/clear-theme/Sneakers12?join=reviews
//!        │                        ◄──────  200 {id, name, variations, variants, reviews}
//!        ▼
//!   storefront_core::Product
//! ```

pub mod client;
pub mod error;

pub use client::{ProductClient, DEFAULT_THEME};
pub use error::ClientError;
