//! # storefront-core: Pure Business Logic for the Storefront
//!
//! This crate holds the product-page state engines as pure, synchronous
//! code with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Rendering layer                              │   │
//! │  │    Gallery ──► Details panel ──► Cart drawer ──► Settings menu │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/storefront                              │   │
//! │  │    load_product, select_variation, add_selected_to_cart, ...   │   │
//! │  └──────────┬──────────────────┬──────────────────────┬────────────┘   │
//! │             │                  │                      │                 │
//! │  ┌──────────▼──────────┐ ┌─────▼─────────────────┐ ┌──▼─────────────┐  │
//! │  │ storefront-client   │ │ ★ storefront-core ★   │ │ storefront-db  │  │
//! │  │ product fetch       │ │  (THIS CRATE)         │ │ key-value      │  │
//! │  │ (reqwest)           │ │                       │ │ (SQLite)       │  │
//! │  └─────────────────────┘ │  variant   cart       │ └────────────────┘  │
//! │                          │  gallery   reviews    │                     │
//! │                          │  settings  currency   │                     │
//! │                          │                       │                     │
//! │                          │  NO I/O • NO NETWORK  │                     │
//! │                          └───────────────────────┘                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product document (axes, options, variants, reviews)
//! - [`variant`] - Variant resolver: selection → variant
//! - [`cart`] - Cart aggregator: line items and totals
//! - [`money`] - Money type with integer arithmetic
//! - [`currency`] - Currency symbols and price formatting
//! - [`settings`] - Language / currency preferences
//! - [`reviews`] - Rating statistics and review filters
//! - [`gallery`] - Color image gallery cursor
//! - [`validation`] - Input checks for commands
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Total functions**: engines never fail; no match is `None`, absent
//!    ids are no-ops
//! 2. **No I/O**: fetching and persistence live in outer crates
//! 3. **Integer Money**: all monetary values are in cents (i64)
//! 4. **Snapshots**: state owners hand out `Arc` snapshots and mutate
//!    copy-on-write
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::cart::CartAggregator;
//! use storefront_core::variant::{ResolverConfig, VariantResolver};
//! use storefront_core::Product;
//!
//! let product: Product = serde_json::from_str(r#"{
//!     "id": "123", "name": "Tee", "price": 50, "sale_price": 40,
//!     "variations": [
//!         {"name": "color", "props": [{"name": "Red"}]},
//!         {"name": "size", "props": [{"name": "M"}]}
//!     ],
//!     "variants": [{"id": "v1", "price": 50, "sale_price": 40,
//!         "variation_props": [
//!             {"variation": "color", "variation_prop": "red"},
//!             {"variation": "size", "variation_prop": "M"}
//!         ]}]
//! }"#).unwrap();
//!
//! let mut resolver = VariantResolver::new(ResolverConfig::lowercase_axes(["color"]));
//! resolver.set_product(product);
//!
//! let mut cart = CartAggregator::new();
//! let candidate = resolver.state().cart_candidate(2).unwrap();
//! cart.add_item(candidate);
//!
//! assert_eq!(cart.items()[0].id, "123-Red-M");
//! assert_eq!(cart.total_price().cents(), 8000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod currency;
pub mod error;
pub mod gallery;
pub mod money;
pub mod reviews;
pub mod settings;
pub mod types;
pub mod validation;
pub mod variant;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartAggregator, CartCandidate, LineItem, SelectedOption, CART_STORAGE_KEY};
pub use error::{CoreError, CoreResult, ValidationError};
pub use gallery::{Gallery, GalleryImage};
pub use money::Money;
pub use reviews::{ReviewFilter, ReviewStats};
pub use settings::{Language, Settings, TextDirection, SETTINGS_STORAGE_KEY};
pub use types::*;
pub use variant::{CasePolicy, DetailsSnapshot, ResolverConfig, Selection, VariantResolver};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single line item.
///
/// Guards against typing 1000 instead of 10 in the quantity stepper.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Version tag written into every persisted envelope.
pub const PERSIST_VERSION: u32 = 0;
