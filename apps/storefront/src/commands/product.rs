//! # Product Commands
//!
//! Loading a product and driving the details panel: variation selection,
//! gallery navigation and the derived price / stock view.
//!
//! ## Load Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Load Flow                                    │
//! │                                                                         │
//! │  load_product("Sneakers12")                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_slug ──invalid──► ApiError::ValidationError                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ticket = details.begin_fetch()                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  GET {api}/products/slug/{theme}/{slug}?join=reviews                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  details.apply_fetched(ticket, product)                                 │
//! │       │                    │                                            │
//! │    current               stale ──► ApiError::Superseded                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  resolver reset: selection defaults to first option of every axis,     │
//! │  gallery follows the default color                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Instant;

use serde::Serialize;
use storefront_client::ProductClient;
use storefront_core::currency::format_price;
use storefront_core::validation::validate_slug;
use storefront_core::{DetailsSnapshot, Gallery, Money, Product, Selection, Variant};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{ConfigState, DetailsState, SettingsState};

/// Everything the details panel renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailsResponse {
    pub product: Option<Product>,
    pub selection: Selection,
    pub selection_complete: bool,
    pub variant: Option<Variant>,

    /// Regular price in cents: the resolved variant's, else the product's
    pub price: Option<Money>,
    pub sale_price: Option<Money>,
    pub formatted_price: Option<String>,
    pub formatted_sale_price: Option<String>,
    pub discount_percent: u32,

    /// Stock of the resolved variant
    pub stock: Option<i64>,

    pub gallery: Gallery,
    pub currency: String,
}

impl DetailsResponse {
    pub fn new(snapshot: &DetailsSnapshot, gallery: Gallery, currency: &str) -> Self {
        let price = snapshot.display_price();
        let sale_price = snapshot.display_sale_price();

        DetailsResponse {
            product: snapshot.product().cloned(),
            selection: snapshot.selection().clone(),
            selection_complete: snapshot.is_selection_complete(),
            variant: snapshot.resolved_variant().cloned(),
            price,
            sale_price,
            formatted_price: price.map(|p| format_price(p, currency)),
            formatted_sale_price: sale_price.map(|p| format_price(p, currency)),
            discount_percent: snapshot.discount_percent(),
            stock: snapshot.stock(),
            gallery,
            currency: currency.to_string(),
        }
    }
}

async fn respond(
    details: &DetailsState,
    settings: &SettingsState,
) -> Result<DetailsResponse, ApiError> {
    let currency = settings.get().await.currency;
    let (snapshot, gallery) = details.view();
    Ok(DetailsResponse::new(&snapshot, gallery, &currency))
}

/// Fetches `slug` and installs it as the current product.
///
/// A load that finishes after a newer `load_product` call started is
/// discarded and reported as `SUPERSEDED`; the newer load's product stays.
/// A failed fetch leaves the previously shown product in place.
pub async fn load_product(
    client: &ProductClient,
    config: &ConfigState,
    details: &DetailsState,
    settings: &SettingsState,
    slug: &str,
) -> Result<DetailsResponse, ApiError> {
    validate_slug(slug)?;
    let slug = slug.trim();

    let ticket = details.begin_fetch();
    let start = Instant::now();
    debug!(slug = %slug, ticket, "load_product command");

    let product = match client
        .fetch_product(slug, &config.theme, config.include_reviews)
        .await
    {
        Ok(product) => product,
        Err(_) if !details.is_current(ticket) => return Err(ApiError::superseded(slug)),
        Err(e) => return Err(e.into()),
    };

    let product_id = product.id.clone();
    if !details.apply_fetched(ticket, product) {
        info!(slug = %slug, "Product load superseded");
        return Err(ApiError::superseded(slug));
    }

    info!(
        slug = %slug,
        product_id = %product_id,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Product loaded"
    );
    respond(details, settings).await
}

pub async fn get_details(
    details: &DetailsState,
    settings: &SettingsState,
) -> Result<DetailsResponse, ApiError> {
    respond(details, settings).await
}

/// Selects `option` on `axis`.
///
/// Unknown axes and options never fail: the selection is recorded and the
/// resolved variant becomes `None` when nothing matches.
pub async fn select_variation(
    details: &DetailsState,
    settings: &SettingsState,
    axis: &str,
    option: &str,
) -> Result<DetailsResponse, ApiError> {
    debug!(axis = %axis, option = %option, "select_variation command");
    details.select_variation(axis, option);
    respond(details, settings).await
}

pub async fn clear_selection(
    details: &DetailsState,
    settings: &SettingsState,
) -> Result<DetailsResponse, ApiError> {
    details.clear_selection();
    respond(details, settings).await
}

/// Shows the gallery image named `name` and selects the matching color.
pub async fn select_image(
    details: &DetailsState,
    settings: &SettingsState,
    name: &str,
) -> Result<DetailsResponse, ApiError> {
    if !details.select_image(name) {
        return Err(ApiError::not_found("Image", name));
    }
    respond(details, settings).await
}

pub async fn next_image(
    details: &DetailsState,
    settings: &SettingsState,
) -> Result<DetailsResponse, ApiError> {
    details.next_image();
    respond(details, settings).await
}

pub async fn previous_image(
    details: &DetailsState,
    settings: &SettingsState,
) -> Result<DetailsResponse, ApiError> {
    details.previous_image();
    respond(details, settings).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::ResolverConfig;

    fn loaded() -> DetailsState {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": "p1", "name": "Tee", "price": 50, "sale_price": 40,
            "variations": [
                {"name": "color", "type": "image", "props": [
                    {"id": "c1", "name": "Red", "value": "/red.jpg"}]},
                {"name": "size", "props": [{"name": "M"}]}
            ],
            "variants": [
                {"id": "v0", "price": 60, "sale_price": 45, "quantity": 4,
                 "variation_props": [
                    {"variation": "color", "variation_prop": "red"},
                    {"variation": "size", "variation_prop": "M"}]}
            ]
        }))
        .unwrap();

        let details = DetailsState::new(ResolverConfig::lowercase_axes(["color"]));
        details.apply_fetched(details.begin_fetch(), product);
        details
    }

    #[test]
    fn test_response_uses_resolved_variant() {
        let details = loaded();
        let (snapshot, gallery) = details.view();

        let response = DetailsResponse::new(&snapshot, gallery, "USD");

        assert_eq!(response.variant.as_ref().map(|v| v.id.as_str()), Some("v0"));
        assert_eq!(response.price, Some(Money::from_cents(6000)));
        assert_eq!(response.formatted_sale_price.as_deref(), Some("$45.00"));
        assert_eq!(response.discount_percent, 25);
        assert_eq!(response.stock, Some(4));
        assert!(response.selection_complete);
    }

    #[test]
    fn test_response_falls_back_to_product_prices() {
        let details = loaded();
        details.select_variation("size", "XL");
        let (snapshot, gallery) = details.view();

        let response = DetailsResponse::new(&snapshot, gallery, "EGP");

        assert!(response.variant.is_none());
        assert_eq!(response.formatted_price.as_deref(), Some("E£50.00"));
        assert_eq!(response.stock, None);
    }

    #[test]
    fn test_empty_response() {
        let details = DetailsState::default();
        let (snapshot, gallery) = details.view();

        let response = DetailsResponse::new(&snapshot, gallery, "USD");
        assert!(response.product.is_none());
        assert!(response.price.is_none());
        assert!(!response.selection_complete);
    }
}
