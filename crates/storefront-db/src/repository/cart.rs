//! # Cart Repository
//!
//! Persists the whole cart document on every change and rehydrates it at
//! startup.
//!
//! ```text
//!   stored under "cart-storage":
//!   {"state": {"items": [{"id": "123-Red-M", "quantity": 2, ...}]}, "version": 0}
//! ```

use tracing::debug;

use storefront_core::{Cart, CART_STORAGE_KEY};

use super::kv::KeyValueRepository;
use super::{load_document, save_document};
use crate::error::DbResult;

#[derive(Debug, Clone)]
pub struct CartRepository {
    kv: KeyValueRepository,
}

impl CartRepository {
    pub fn new(kv: KeyValueRepository) -> Self {
        CartRepository { kv }
    }

    /// Loads the persisted cart; `None` when nothing usable is stored.
    pub async fn load(&self) -> DbResult<Option<Cart>> {
        let cart: Option<Cart> = load_document(&self.kv, CART_STORAGE_KEY).await?;
        debug!(
            lines = cart.as_ref().map(|c| c.items.len()).unwrap_or(0),
            "Loaded cart"
        );
        Ok(cart)
    }

    /// Writes the full cart, replacing what was stored.
    pub async fn save(&self, cart: &Cart) -> DbResult<()> {
        debug!(lines = cart.items.len(), "Saving cart");
        save_document(&self.kv, CART_STORAGE_KEY, cart).await
    }

    /// Drops the stored cart entirely.
    pub async fn delete(&self) -> DbResult<bool> {
        self.kv.delete(CART_STORAGE_KEY).await
    }
}
