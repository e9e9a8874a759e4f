//! # storefront-db: Persistence Layer for the Storefront
//!
//! Keeps the cart and the shopper's settings across restarts in a local
//! SQLite database, using sqlx for async access.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Data Flow                             │
//! │                                                                         │
//! │  Command (add_selected_to_cart)                                        │
//! │       │  CartState mutates the aggregator, then saves                  │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   storefront-db (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────────┐  ┌─────────────┐  │   │
//! │  │   │   Database    │    │  Repositories     │  │ Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                   │  │ (embedded)  │  │   │
//! │  │   │               │    │ CartRepository    │  │             │  │   │
//! │  │   │ SqlitePool    │◄───│ SettingsRepository│  │ 001_key_    │  │   │
//! │  │   │               │    │ KeyValueRepository│  │   value.sql │  │   │
//! │  │   └───────────────┘    └───────────────────┘  └─────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   SQLite: <data dir>/storefront.db                              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Key-value, cart and settings repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("storefront.db")).await?;
//!
//! let cart = db.carts().load().await?.unwrap_or_default();
//! db.carts().save(&cart).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::cart::CartRepository;
pub use repository::kv::KeyValueRepository;
pub use repository::settings::SettingsRepository;
pub use repository::Persisted;
