//! # Repository Module
//!
//! Storage repositories for the storefront's persisted state.
//!
//! ## Layering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CartState / SettingsState (app)                                       │
//! │       │                                                                 │
//! │       │  db.carts().save(&cart)                                        │
//! │       ▼                                                                 │
//! │  CartRepository / SettingsRepository                                   │
//! │  ├── load(&self)  → Option<T>     (missing or corrupt → None)          │
//! │  └── save(&self, &T)               wraps T in a Persisted envelope     │
//! │       │                                                                 │
//! │       │  kv.set("cart-storage", bytes)                                 │
//! │       ▼                                                                 │
//! │  KeyValueRepository                                                    │
//! │  ├── get(key) → Option<Vec<u8>>                                        │
//! │  ├── set(key, bytes)   upsert                                          │
//! │  └── delete(key)                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  kv_store table                                                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`KeyValueRepository`](kv::KeyValueRepository) - Raw byte storage
//! - [`CartRepository`](cart::CartRepository) - Cart document
//! - [`SettingsRepository`](settings::SettingsRepository) - Settings document

pub mod cart;
pub mod kv;
pub mod settings;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::DbResult;
use kv::KeyValueRepository;
use storefront_core::PERSIST_VERSION;

/// On-disk wrapper around a persisted document.
///
/// ```json
/// {"state": {"items": []}, "version": 0}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persisted<T> {
    pub state: T,
    pub version: u32,
}

impl<T> Persisted<T> {
    pub fn new(state: T) -> Self {
        Persisted {
            state,
            version: PERSIST_VERSION,
        }
    }
}

/// Reads and decodes the envelope under `key`.
///
/// Undecodable bytes and envelopes of another version are logged and
/// reported as absent so a damaged entry never blocks startup. Storage failures still propagate.
pub(crate) async fn load_document<T>(kv: &KeyValueRepository, key: &str) -> DbResult<Option<T>>
where
    T: DeserializeOwned,
{
    let Some(bytes) = kv.get(key).await? else {
        return Ok(None);
    };

    match serde_json::from_slice::<Persisted<T>>(&bytes) {
        Ok(envelope) => {
            if envelope.version != PERSIST_VERSION {
                warn!(
                    key = %key,
                    version = envelope.version,
                    "Discarding persisted document with unknown version"
                );
                return Ok(None);
            }
            Ok(Some(envelope.state))
        }
        Err(e) => {
            warn!(key = %key, error = %e, "Discarding corrupt persisted document");
            Ok(None)
        }
    }
}

/// Encodes `state` in an envelope and writes it under `key`.
pub(crate) async fn save_document<T>(kv: &KeyValueRepository, key: &str, state: &T) -> DbResult<()>
where
    T: Serialize,
{
    let bytes = serde_json::to_vec(&Persisted::new(state))?;
    kv.set(key, &bytes).await
}
