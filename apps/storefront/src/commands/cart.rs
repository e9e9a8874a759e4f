//! # Cart Commands
//!
//! Commands for cart manipulation. Every mutation is written through to
//! storage before the new cart is returned.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐  add_selected_to_cart  ┌──────────┐                       │
//! │  │  Empty   │───────────────────────►│ In Cart  │◄──┐                   │
//! │  │  Cart    │                        │          │   │ add (merge)       │
//! │  └──────────┘                        └──────────┘   │ update_cart_item  │
//! │       ▲                                   │  │      │ remove_from_cart  │
//! │       │                                   │  └──────┘                   │
//! │       └──────────── clear_cart ───────────┘                             │
//! │                                                                         │
//! │  Restart: the cart is rehydrated from "cart-storage" before the first  │
//! │  command runs.                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use storefront_core::currency::format_price;
use storefront_core::validation::validate_quantity;
use storefront_core::{Cart, LineItem, Money};
use tracing::debug;

use crate::error::ApiError;
use crate::state::{CartState, DetailsState, SettingsState};

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<LineItem>,
    pub total_items: i64,

    /// Sum of sale price × quantity, in cents
    pub total_price: Money,
    pub total_regular_price: Money,
    pub formatted_total: String,
    pub currency: String,
}

impl CartResponse {
    pub fn new(cart: &Cart, currency: &str) -> Self {
        let total_price = cart.total_price();
        CartResponse {
            items: cart.items.clone(),
            total_items: cart.total_items(),
            total_price,
            total_regular_price: cart.total_regular_price(),
            formatted_total: format_price(total_price, currency),
            currency: currency.to_string(),
        }
    }
}

async fn respond(cart: &Cart, settings: &SettingsState) -> CartResponse {
    CartResponse::new(cart, &settings.get().await.currency)
}

/// Gets the current cart contents.
pub async fn get_cart(cart: &CartState, settings: &SettingsState) -> CartResponse {
    debug!("get_cart command");
    let snapshot = cart.snapshot().await;
    respond(&snapshot, settings).await
}

/// Adds the resolved variant of the details panel to the cart.
///
/// ## Behavior
/// - No resolved variant: `CART_ERROR`, cart untouched
/// - Same product and options already in the cart: quantity increases
/// - Otherwise: appended as a new line with the variant's prices frozen
///
/// ## Arguments
/// * `quantity` - Quantity to add (default: 1, range 1-999)
pub async fn add_selected_to_cart(
    details: &DetailsState,
    cart: &CartState,
    settings: &SettingsState,
    quantity: Option<i64>,
) -> Result<CartResponse, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(quantity = %quantity, "add_selected_to_cart command");

    validate_quantity(quantity)?;

    let candidate = details
        .cart_candidate(quantity)
        .ok_or_else(|| ApiError::cart("Choose an available option for every variation first"))?;

    let updated = cart.add_item(candidate).await?;
    Ok(respond(&updated, settings).await)
}

/// Sets the quantity of a line. Zero or less removes the line.
pub async fn update_cart_item(
    cart: &CartState,
    settings: &SettingsState,
    id: &str,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(id = %id, quantity = %quantity, "update_cart_item command");
    let updated = cart.update_quantity(id, quantity).await?;
    Ok(respond(&updated, settings).await)
}

/// Removes a line. Removing an unknown line is a no-op.
pub async fn remove_from_cart(
    cart: &CartState,
    settings: &SettingsState,
    id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(id = %id, "remove_from_cart command");
    let updated = cart.remove_item(id).await?;
    Ok(respond(&updated, settings).await)
}

pub async fn clear_cart(
    cart: &CartState,
    settings: &SettingsState,
) -> Result<CartResponse, ApiError> {
    debug!("clear_cart command");
    let updated = cart.clear().await?;
    Ok(respond(&updated, settings).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{CartAggregator, CartCandidate, SelectedOption};

    #[test]
    fn test_response_totals() {
        let mut aggregator = CartAggregator::new();
        aggregator.add_item(CartCandidate {
            product_id: "123".to_string(),
            variant_id: "v0".to_string(),
            product_name: "Tee".to_string(),
            product_image: "/red.jpg".to_string(),
            options: vec![SelectedOption {
                axis: "color".to_string(),
                value: "Red".to_string(),
            }],
            unit_price: Money::from_cents(5000),
            unit_sale_price: Money::from_cents(4000),
            quantity: 3,
        });

        let response = CartResponse::new(aggregator.cart(), "EGP");

        assert_eq!(response.total_items, 3);
        assert_eq!(response.total_price, Money::from_cents(12000));
        assert_eq!(response.total_regular_price, Money::from_cents(15000));
        assert_eq!(response.formatted_total, "E£120.00");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["totalPrice"], 12000);
        assert_eq!(json["items"][0]["id"], "123-Red");
    }

    #[tokio::test]
    async fn test_update_missing_line_to_zero_returns_cart() {
        let db = storefront_db::Database::new(storefront_db::DbConfig::in_memory())
            .await
            .unwrap();
        let cart = CartState::load(db.carts()).await.unwrap();
        let settings = SettingsState::load(db.settings(), "USD").await.unwrap();

        let response = update_cart_item(&cart, &settings, "missing", 0).await.unwrap();
        assert!(response.items.is_empty());
        assert_eq!(response.total_items, 0);

        let err = update_cart_item(&cart, &settings, "missing", 2).await.unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::NotFound);
    }
}
