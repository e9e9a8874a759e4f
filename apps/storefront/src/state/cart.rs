//! # Cart State
//!
//! Owns the cart aggregator and writes the cart through to storage.
//!
//! ## Thread Safety
//! The aggregator sits behind a `tokio::sync::Mutex` because:
//! 1. Multiple commands may modify the cart concurrently
//! 2. The save happens while the lock is held, so stored carts land in
//!    mutation order
//!
//! ## Write-through Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  lock ──► clone aggregator (Arc, cheap) ──► apply mutation             │
//! │                                                 │                       │
//! │                              changed? ──no──────┼──► return snapshot    │
//! │                                 │               │                       │
//! │                                yes              │                       │
//! │                                 ▼               │                       │
//! │                         repo.save(cart) ──err───┼──► return error,      │
//! │                                 │               │    state unchanged    │
//! │                                 ▼               │                       │
//! │                         commit clone ───────────┴──► return snapshot    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use storefront_core::{Cart, CartAggregator, CartCandidate, MAX_ITEM_QUANTITY};
use storefront_db::{CartRepository, DbResult};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::ApiError;

/// Cart state owner.
#[derive(Debug)]
pub struct CartState {
    aggregator: Mutex<CartAggregator>,
    repo: CartRepository,
}

impl CartState {
    /// Creates cart state around an already-rehydrated cart.
    pub fn new(cart: Cart, repo: CartRepository) -> Self {
        CartState {
            aggregator: Mutex::new(CartAggregator::from_cart(cart)),
            repo,
        }
    }

    /// Rehydrates the cart from storage; a missing or corrupt entry starts
    /// empty.
    pub async fn load(repo: CartRepository) -> DbResult<Self> {
        let cart = repo.load().await?.unwrap_or_default();
        info!(
            lines = cart.line_count(),
            items = cart.total_items(),
            "Cart rehydrated"
        );
        Ok(CartState::new(cart, repo))
    }

    pub async fn snapshot(&self) -> Arc<Cart> {
        self.aggregator.lock().await.snapshot()
    }

    /// Applies `mutation` and persists the result if it reports a change.
    ///
    /// On a rejected mutation or a failed save the in-memory cart is left as
    /// it was.
    async fn mutate<F>(&self, mutation: F) -> Result<Arc<Cart>, ApiError>
    where
        F: FnOnce(&mut CartAggregator) -> Result<bool, ApiError>,
    {
        let mut aggregator = self.aggregator.lock().await;

        let mut next = aggregator.clone();
        if !mutation(&mut next)? {
            return Ok(aggregator.snapshot());
        }

        self.repo.save(next.cart()).await?;
        *aggregator = next;
        debug!(
            lines = aggregator.items().len(),
            items = aggregator.total_items(),
            "Cart saved"
        );
        Ok(aggregator.snapshot())
    }

    /// Adds a candidate, merging into an existing line. The merged quantity
    /// may not exceed `MAX_ITEM_QUANTITY`.
    pub async fn add_item(&self, candidate: CartCandidate) -> Result<Arc<Cart>, ApiError> {
        self.mutate(|cart| {
            let existing = cart
                .cart()
                .get(&candidate.line_item_id())
                .map_or(0, |line| line.quantity);
            if existing.saturating_add(candidate.quantity) > MAX_ITEM_QUANTITY {
                return Err(quantity_exceeded());
            }
            Ok(cart.add_item(candidate))
        })
        .await
    }

    /// Sets a line's quantity; zero or less removes the line, and removing
    /// an unknown line is a no-op.
    pub async fn update_quantity(&self, id: &str, quantity: i64) -> Result<Arc<Cart>, ApiError> {
        self.mutate(|cart| {
            if quantity <= 0 {
                return Ok(cart.remove_item(id));
            }
            if quantity > MAX_ITEM_QUANTITY {
                return Err(quantity_exceeded());
            }
            if cart.cart().get(id).is_none() {
                return Err(ApiError::not_found("Line item", id));
            }
            Ok(cart.update_quantity(id, quantity))
        })
        .await
    }

    pub async fn remove_item(&self, id: &str) -> Result<Arc<Cart>, ApiError> {
        self.mutate(|cart| Ok(cart.remove_item(id))).await
    }

    pub async fn clear(&self) -> Result<Arc<Cart>, ApiError> {
        self.mutate(|cart| Ok(cart.clear_cart())).await
    }
}

fn quantity_exceeded() -> ApiError {
    ApiError::validation(format!(
        "quantity must be between 1 and {}",
        MAX_ITEM_QUANTITY
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{Money, SelectedOption};
    use storefront_db::{Database, DbConfig};

    fn candidate(color: &str, qty: i64) -> CartCandidate {
        CartCandidate {
            product_id: "123".to_string(),
            variant_id: format!("v-{}", color),
            product_name: "Tee".to_string(),
            product_image: "/tee.jpg".to_string(),
            options: vec![
                SelectedOption {
                    axis: "color".to_string(),
                    value: color.to_string(),
                },
                SelectedOption {
                    axis: "size".to_string(),
                    value: "M".to_string(),
                },
            ],
            unit_price: Money::from_cents(5000),
            unit_sale_price: Money::from_cents(4000),
            quantity: qty,
        }
    }

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_mutations_are_written_through() {
        let db = db().await;
        let state = CartState::load(db.carts()).await.unwrap();

        state.add_item(candidate("Red", 1)).await.unwrap();
        state.add_item(candidate("Red", 2)).await.unwrap();
        state.add_item(candidate("Blue", 1)).await.unwrap();

        let stored = db.carts().load().await.unwrap().unwrap();
        assert_eq!(stored.items.len(), 2);
        assert_eq!(stored.items[0].id, "123-Red-M");
        assert_eq!(stored.items[0].quantity, 3);

        state.update_quantity("123-Red-M", 0).await.unwrap();
        let stored = db.carts().load().await.unwrap().unwrap();
        assert_eq!(stored.items.len(), 1);
        assert_eq!(stored.items[0].id, "123-Blue-M");
    }

    #[tokio::test]
    async fn test_rehydrates_previous_cart() {
        let db = db().await;
        {
            let state = CartState::load(db.carts()).await.unwrap();
            state.add_item(candidate("Red", 2)).await.unwrap();
        }

        let reloaded = CartState::load(db.carts()).await.unwrap();
        let cart = reloaded.snapshot().await;
        assert_eq!(cart.total_items(), 2);
        assert_eq!(cart.total_price(), Money::from_cents(8000));
    }

    #[tokio::test]
    async fn test_noop_mutation_does_not_write() {
        let db = db().await;
        let state = CartState::load(db.carts()).await.unwrap();

        state.remove_item("missing").await.unwrap();
        state.clear().await.unwrap();

        assert_eq!(db.kv().get("cart-storage").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_failed_save_leaves_cart_unchanged() {
        let db = db().await;
        let state = CartState::load(db.carts()).await.unwrap();
        state.add_item(candidate("Red", 1)).await.unwrap();

        db.close().await;
        assert!(state.add_item(candidate("Blue", 1)).await.is_err());

        let cart = state.snapshot().await;
        assert_eq!(cart.items.len(), 1);
    }

    #[tokio::test]
    async fn test_clear() {
        let db = db().await;
        let state = CartState::load(db.carts()).await.unwrap();
        state.add_item(candidate("Red", 1)).await.unwrap();

        let cart = state.clear().await.unwrap();
        assert!(cart.is_empty());
        assert_eq!(db.carts().load().await.unwrap(), Some(Cart::default()));
    }

    #[tokio::test]
    async fn test_merged_quantity_is_capped() {
        let db = db().await;
        let state = CartState::load(db.carts()).await.unwrap();
        state.add_item(candidate("Red", 990)).await.unwrap();

        let err = state.add_item(candidate("Red", 10)).await.unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ValidationError);
        assert_eq!(state.snapshot().await.items[0].quantity, 990);

        state.add_item(candidate("Red", 9)).await.unwrap();
        assert_eq!(state.snapshot().await.items[0].quantity, 999);
    }

    #[tokio::test]
    async fn test_update_unknown_line() {
        let db = db().await;
        let state = CartState::load(db.carts()).await.unwrap();

        let err = state.update_quantity("nope", 2).await.unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::NotFound);
        assert!(state.update_quantity("nope", 1000).await.is_err());
    }

    #[tokio::test]
    async fn test_zero_quantity_on_unknown_line_is_noop() {
        let db = db().await;
        let state = CartState::load(db.carts()).await.unwrap();
        state.add_item(candidate("Red", 2)).await.unwrap();

        let cart = state.update_quantity("missing", 0).await.unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.total_items(), 2);

        let cart = state.update_quantity("missing", -3).await.unwrap();
        assert_eq!(cart.items.len(), 1);
    }

    #[tokio::test]
    async fn test_huge_candidate_is_rejected_without_overflow() {
        let db = db().await;
        let state = CartState::load(db.carts()).await.unwrap();
        state.add_item(candidate("Red", 5)).await.unwrap();

        let err = state.add_item(candidate("Red", i64::MAX)).await.unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ValidationError);
        assert_eq!(state.snapshot().await.items[0].quantity, 5);
    }
}
