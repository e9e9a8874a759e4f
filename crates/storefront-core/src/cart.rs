//! # Cart Aggregator
//!
//! Line items keyed by product + chosen axis values, with derived totals.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  UI Action              Aggregator Call           State Change          │
//! │  ─────────              ───────────────           ────────────          │
//! │                                                                         │
//! │  Add to cart ─────────► add_item(candidate) ────► same id? qty += n     │
//! │                                                    new id?  push        │
//! │                                                                         │
//! │  Change quantity ─────► update_quantity(id, n) ─► n <= 0? remove        │
//! │                                                    else     qty = n     │
//! │                                                                         │
//! │  Remove ──────────────► remove_item(id) ────────► retain(id != ..)      │
//! │                                                                         │
//! │  Empty cart ──────────► clear_cart() ───────────► items.clear()         │
//! │                                                                         │
//! │  Cart badge / drawer ─► total_items(), total_price()  (read only)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Items are unique by line item id, in insertion order
//! - Every quantity is >= 1; driving it to 0 or below removes the line
//! - Totals always use the unit **sale** price; the regular price is only
//!   shown struck through
//!
//! Mutators return `true` when the cart changed, so the persistence layer
//! can skip writes for no-ops.

use std::borrow::Cow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Storage key the cart document is persisted under.
pub const CART_STORAGE_KEY: &str = "cart-storage";

// =============================================================================
// Candidate & Line Item
// =============================================================================

/// One chosen axis value, kept on the line for display ("Color: Red").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SelectedOption {
    pub axis: String,
    pub value: String,
}

/// What the details panel hands to the cart when the shopper adds an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartCandidate {
    pub product_id: String,
    pub variant_id: String,
    pub product_name: String,
    pub product_image: String,
    /// Axis values in the product's axis order.
    pub options: Vec<SelectedOption>,
    pub unit_price: Money,
    pub unit_sale_price: Money,
    pub quantity: i64,
}

impl CartCandidate {
    /// The identifier a line built from this candidate gets.
    pub fn line_item_id(&self) -> String {
        line_item_id(&self.product_id, &self.options)
    }
}

/// Composes a line item id from a product id and axis values.
///
/// Parts are joined with `-`. A `-` or `%` inside a part is written as
/// `%2D` / `%25`, so distinct (product, values) pairs never share an id.
///
/// ```rust
/// use storefront_core::cart::{line_item_id, SelectedOption};
///
/// let options = [
///     SelectedOption { axis: "color".into(), value: "Red".into() },
///     SelectedOption { axis: "size".into(), value: "M".into() },
/// ];
/// assert_eq!(line_item_id("123", &options), "123-Red-M");
///
/// let options = [SelectedOption { axis: "color".into(), value: "Navy-Blue".into() }];
/// assert_eq!(line_item_id("123", &options), "123-Navy%2DBlue");
/// ```
pub fn line_item_id(product_id: &str, options: &[SelectedOption]) -> String {
    std::iter::once(product_id)
        .chain(options.iter().map(|o| o.value.as_str()))
        .map(escape_id_part)
        .collect::<Vec<_>>()
        .join("-")
}

fn escape_id_part(part: &str) -> Cow<'_, str> {
    if part.contains(['-', '%']) {
        Cow::Owned(part.replace('%', "%25").replace('-', "%2D"))
    } else {
        Cow::Borrowed(part)
    }
}

/// A row in the cart.
///
/// Display fields are frozen at the first add: merging a later candidate
/// only bumps the quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: String,
    pub product_id: String,
    pub variant_id: String,
    pub product_name: String,
    pub product_image: String,
    pub options: Vec<SelectedOption>,
    pub unit_price: Money,
    pub unit_sale_price: Money,
    pub quantity: i64,
}

impl LineItem {
    fn from_candidate(candidate: CartCandidate) -> Self {
        LineItem {
            id: candidate.line_item_id(),
            product_id: candidate.product_id,
            variant_id: candidate.variant_id,
            product_name: candidate.product_name,
            product_image: candidate.product_image,
            options: candidate.options,
            unit_price: candidate.unit_price,
            unit_sale_price: candidate.unit_sale_price,
            quantity: candidate.quantity,
        }
    }

    /// Selected value for `axis`, if the line has one.
    pub fn option(&self, axis: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.axis == axis)
            .map(|o| o.value.as_str())
    }

    /// unit sale price × quantity
    pub fn line_total(&self) -> Money {
        self.unit_sale_price.multiply_quantity(self.quantity)
    }

    /// unit regular price × quantity, for strikethrough display
    pub fn line_regular_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The cart document: the unit of persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    pub items: Vec<LineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities across all lines.
    pub fn total_items(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |total, i| total.saturating_add(i.quantity))
    }

    /// Sum of unit sale price × quantity across all lines.
    pub fn total_price(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Sum of unit regular price × quantity, for "you save" display.
    pub fn total_regular_price(&self) -> Money {
        self.items.iter().map(LineItem::line_regular_total).sum()
    }
}

// =============================================================================
// Aggregator
// =============================================================================

/// The cart state owner.
///
/// ## Thread Safety
/// The aggregator itself is single-owner (`&mut self` mutations). Readers
/// take an `Arc<Cart>` snapshot; a mutation while a snapshot is held copies
/// the cart first (`Arc::make_mut`), so no reader sees a half-applied change.
#[derive(Debug, Clone, Default)]
pub struct CartAggregator {
    state: Arc<Cart>,
}

impl CartAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrates from a persisted cart.
    pub fn from_cart(cart: Cart) -> Self {
        CartAggregator {
            state: Arc::new(cart),
        }
    }

    pub fn snapshot(&self) -> Arc<Cart> {
        Arc::clone(&self.state)
    }

    pub fn cart(&self) -> &Cart {
        &self.state
    }

    pub fn items(&self) -> &[LineItem] {
        &self.state.items
    }

    pub fn total_items(&self) -> i64 {
        self.state.total_items()
    }

    pub fn total_price(&self) -> Money {
        self.state.total_price()
    }

    /// Adds a candidate, merging into an existing line with the same id.
    ///
    /// ## Behavior
    /// - Same product + axis values already in cart: quantity increases,
    ///   every other field keeps its first-written value
    /// - Otherwise: appended as a new line
    /// - Candidate quantity below 1: ignored
    pub fn add_item(&mut self, candidate: CartCandidate) -> bool {
        if candidate.quantity < 1 {
            return false;
        }

        let id = candidate.line_item_id();
        let cart = Arc::make_mut(&mut self.state);
        match cart.items.iter_mut().find(|i| i.id == id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(candidate.quantity)
            }
            None => cart.items.push(LineItem::from_candidate(candidate)),
        }
        true
    }

    /// Removes the line with `id`. Absent ids are a no-op.
    pub fn remove_item(&mut self, id: &str) -> bool {
        if self.state.get(id).is_none() {
            return false;
        }
        Arc::make_mut(&mut self.state).items.retain(|i| i.id != id);
        true
    }

    /// Sets a line's quantity; `quantity <= 0` removes the line.
    pub fn update_quantity(&mut self, id: &str, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(id);
        }

        match self.state.get(id) {
            Some(item) if item.quantity != quantity => {}
            _ => return false,
        }

        let cart = Arc::make_mut(&mut self.state);
        if let Some(item) = cart.items.iter_mut().find(|i| i.id == id) {
            item.quantity = quantity;
        }
        true
    }

    pub fn clear_cart(&mut self) -> bool {
        if self.state.is_empty() {
            return false;
        }
        Arc::make_mut(&mut self.state).items.clear();
        true
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(product_id: &str, color: &str, size: &str, sale_cents: i64, qty: i64) -> CartCandidate {
        CartCandidate {
            product_id: product_id.to_string(),
            variant_id: format!("v-{}-{}", color, size),
            product_name: format!("Product {}", product_id),
            product_image: format!("/{}.jpg", color),
            options: vec![
                SelectedOption {
                    axis: "color".to_string(),
                    value: color.to_string(),
                },
                SelectedOption {
                    axis: "size".to_string(),
                    value: size.to_string(),
                },
            ],
            unit_price: Money::from_cents(sale_cents + 1000),
            unit_sale_price: Money::from_cents(sale_cents),
            quantity: qty,
        }
    }

    #[test]
    fn test_add_item_to_empty_cart() {
        let mut cart = CartAggregator::new();
        assert!(cart.add_item(candidate("1", "Red", "M", 4000, 1)));

        let item = &cart.items()[0];
        assert_eq!(item.id, "1-Red-M");
        assert_eq!(item.product_name, "Product 1");
        assert_eq!(item.option("color"), Some("Red"));
        assert_eq!(item.option("size"), Some("M"));
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_same_product_and_values_merge() {
        let mut cart = CartAggregator::new();
        cart.add_item(candidate("1", "Red", "M", 4000, 1));
        cart.add_item(candidate("1", "Red", "M", 4000, 2));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
    }

    #[test]
    fn test_merge_keeps_first_display_fields() {
        let mut cart = CartAggregator::new();
        cart.add_item(candidate("1", "Red", "M", 4000, 1));

        let mut later = candidate("1", "Red", "M", 3000, 1);
        later.product_name = "Renamed".to_string();
        later.variant_id = "other".to_string();
        cart.add_item(later);

        let item = &cart.items()[0];
        assert_eq!(item.product_name, "Product 1");
        assert_eq!(item.variant_id, "v-Red-M");
        assert_eq!(item.unit_sale_price, Money::from_cents(4000));
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn test_differing_values_are_separate_lines() {
        let mut cart = CartAggregator::new();
        cart.add_item(candidate("1", "Red", "M", 4000, 1));
        cart.add_item(candidate("1", "Blue", "M", 4000, 1));

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[0].option("color"), Some("Red"));
        assert_eq!(cart.items()[1].option("color"), Some("Blue"));
    }

    #[test]
    fn test_separator_inside_values_keeps_lines_apart() {
        let mut cart = CartAggregator::new();
        cart.add_item(candidate("1", "Navy-Blue", "L", 4000, 1));
        cart.add_item(candidate("1", "Navy", "Blue-L", 4000, 1));

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[0].id, "1-Navy%2DBlue-L");
        assert_eq!(cart.items()[1].id, "1-Navy-Blue%2DL");
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_separator_inside_product_id_keeps_lines_apart() {
        let mut cart = CartAggregator::new();
        cart.add_item(candidate("a-b", "c", "M", 4000, 1));
        cart.add_item(candidate("a", "b-c", "M", 4000, 1));

        assert_eq!(cart.items().len(), 2);
        assert_ne!(cart.items()[0].id, cart.items()[1].id);
    }

    #[test]
    fn test_escape_character_is_escaped() {
        let mut cart = CartAggregator::new();
        cart.add_item(candidate("1", "50%2D", "M", 4000, 1));
        cart.add_item(candidate("1", "50-", "M", 4000, 1));

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[0].id, "1-50%252D-M");
    }

    #[test]
    fn test_merge_saturates_instead_of_overflowing() {
        let mut cart = CartAggregator::new();
        cart.add_item(candidate("1", "Red", "M", 1, i64::MAX));
        assert!(cart.add_item(candidate("1", "Red", "M", 1, 1)));

        assert_eq!(cart.items()[0].quantity, i64::MAX);
        assert_eq!(cart.total_items(), i64::MAX);
    }

    #[test]
    fn test_totals_saturate_instead_of_overflowing() {
        let mut cart = CartAggregator::new();
        cart.add_item(candidate("1", "Red", "M", 1000, i64::MAX / 10));
        cart.add_item(candidate("2", "Red", "M", 1000, i64::MAX / 10));

        assert_eq!(cart.total_price(), Money::from_cents(i64::MAX));
        assert_eq!(cart.cart().total_regular_price(), Money::from_cents(i64::MAX));
    }

    #[test]
    fn test_non_positive_candidate_quantity_is_ignored() {
        let mut cart = CartAggregator::new();
        assert!(!cart.add_item(candidate("1", "Red", "M", 4000, 0)));
        assert!(!cart.add_item(candidate("1", "Red", "M", 4000, -2)));
        assert!(cart.cart().is_empty());
    }

    #[test]
    fn test_remove_item() {
        let mut cart = CartAggregator::new();
        cart.add_item(candidate("1", "Red", "M", 4000, 1));
        cart.add_item(candidate("2", "Blue", "L", 5000, 1));

        assert!(cart.remove_item("1-Red-M"));
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].product_id, "2");
    }

    #[test]
    fn test_remove_absent_item_is_noop() {
        let mut cart = CartAggregator::new();
        cart.add_item(candidate("1", "Red", "M", 4000, 1));

        assert!(!cart.remove_item("non-existent-id"));
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = CartAggregator::new();
        cart.add_item(candidate("1", "Red", "M", 4000, 5));
        cart.add_item(candidate("2", "Blue", "L", 5000, 1));

        assert!(cart.update_quantity("1-Red-M", 2));
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.items()[1].quantity, 1);

        // unchanged quantity and absent ids report no change
        assert!(!cart.update_quantity("1-Red-M", 2));
        assert!(!cart.update_quantity("missing", 4));
    }

    #[test]
    fn test_update_quantity_to_zero_or_negative_removes() {
        let mut cart = CartAggregator::new();
        cart.add_item(candidate("1", "Red", "M", 4000, 1));
        cart.add_item(candidate("2", "Blue", "L", 5000, 1));

        assert!(cart.update_quantity("1-Red-M", 0));
        assert!(cart.update_quantity("2-Blue-L", -5));
        assert!(cart.cart().is_empty());
    }

    #[test]
    fn test_totals() {
        let mut cart = CartAggregator::new();
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), Money::zero());

        cart.add_item(candidate("1", "Red", "M", 4000, 2));
        cart.add_item(candidate("2", "Blue", "L", 2500, 3));

        assert_eq!(cart.total_items(), 5);
        assert_eq!(cart.total_price(), Money::from_major_minor(155, 0));
        assert_eq!(cart.cart().total_regular_price().cents(), 5000 * 2 + 3500 * 3);
    }

    #[test]
    fn test_total_uses_sale_price_even_when_higher() {
        let mut cart = CartAggregator::new();
        let mut c = candidate("1", "Red", "M", 4000, 1);
        c.unit_price = Money::from_cents(3000);
        cart.add_item(c);

        assert_eq!(cart.total_price(), Money::from_cents(4000));
    }

    #[test]
    fn test_clear_cart() {
        let mut cart = CartAggregator::new();
        assert!(!cart.clear_cart());

        cart.add_item(candidate("1", "Red", "M", 4000, 2));
        assert!(cart.clear_cart());
        assert!(cart.cart().is_empty());
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn test_snapshot_survives_mutation() {
        let mut cart = CartAggregator::new();
        cart.add_item(candidate("1", "Red", "M", 4000, 1));

        let before = cart.snapshot();
        cart.update_quantity("1-Red-M", 7);
        cart.add_item(candidate("2", "Blue", "L", 2500, 1));

        assert_eq!(before.items.len(), 1);
        assert_eq!(before.items[0].quantity, 1);
        assert_eq!(cart.items().len(), 2);
    }

    #[test]
    fn test_serialized_document_round_trips() {
        let mut cart = CartAggregator::new();
        cart.add_item(candidate("2", "Blue", "L", 2500, 3));
        cart.add_item(candidate("1", "Red", "M", 4000, 2));

        let json = serde_json::to_string(cart.cart()).unwrap();
        assert!(json.contains(r#""unitSalePrice":2500"#));

        let restored = CartAggregator::from_cart(serde_json::from_str(&json).unwrap());
        assert_eq!(restored.items(), cart.items());
        assert_eq!(restored.items()[0].id, "2-Blue-L");
    }
}
