//! # Commands Module
//!
//! All operations the rendering layer can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── product.rs   ◄─── Product load, variation selection, gallery
//! ├── cart.rs      ◄─── Cart manipulation
//! ├── settings.rs  ◄─── Language / currency
//! └── reviews.rs   ◄─── Rating stats and review filtering
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs and returns
//! `Result<Response, ApiError>`; responses serialize to camelCase JSON.
//! ```rust,ignore
//! // Only needs details + settings (for price formatting)
//! async fn select_variation(details: &DetailsState, settings: &SettingsState, ...)
//!
//! // Reads details, writes cart
//! async fn add_selected_to_cart(details: &DetailsState, cart: &CartState, ...)
//! ```

pub mod cart;
pub mod product;
pub mod reviews;
pub mod settings;
