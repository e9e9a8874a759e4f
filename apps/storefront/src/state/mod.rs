//! # State Module
//!
//! Manages application state for the storefront.
//!
//! ## Why Multiple State Types?
//! Each command takes only the state it touches, and independent states
//! don't block each other: a shopper flipping through images never waits
//! on a cart save.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐   │
//! │  │ DetailsState │ │  CartState   │ │SettingsState │ │ ConfigState  │   │
//! │  │              │ │              │ │              │ │              │   │
//! │  │  resolver    │ │  aggregator  │ │  language    │ │  api_url     │   │
//! │  │  gallery     │ │  repository  │ │  currency    │ │  theme       │   │
//! │  │  generation  │ │              │ │  repository  │ │  case rules  │   │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘   │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • DetailsState: std RwLock, never held across .await                  │
//! │  • CartState / SettingsState: tokio Mutex, held across the save        │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;
mod details;
mod settings;

pub use cart::CartState;
pub use config::{ConfigState, DEFAULT_API_URL, DEFAULT_PRODUCT_SLUG};
pub use details::DetailsState;
pub use settings::SettingsState;
