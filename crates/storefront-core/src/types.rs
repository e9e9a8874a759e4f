//! # Domain Types
//!
//! The product document as delivered by the product API, plus reviews.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Product Document                                │
//! │                                                                         │
//! │  Product                                                               │
//! │  ├── id, slug, name, description, thumb, images                        │
//! │  ├── price / sale_price (base, used when no variant is resolved)       │
//! │  ├── variations: [VariationAxis]        ordered                        │
//! │  │     ├── name: "color"                                               │
//! │  │     └── props: [AxisOption]  { name: "Red", value: "https://.." }   │
//! │  ├── variants: [Variant]                unordered                      │
//! │  │     ├── price / sale_price / quantity                               │
//! │  │     └── variation_props: [VariantTag] { variation, variation_prop } │
//! │  └── reviews: [Review]                  optional (?join=reviews)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field names follow the backend's snake_case JSON. Rust-side names differ
//! where the backend's are unclear (`variations` → `axes`, `props` →
//! `options`, `variation_props` → `tags`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Deserializes `null` as the type's default (the API sends `"reviews": null`).
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// =============================================================================
// Product
// =============================================================================

/// A product page document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    pub id: String,

    #[serde(default, deserialize_with = "nullable")]
    pub slug: String,

    pub name: String,

    #[serde(default, deserialize_with = "nullable")]
    pub description: String,

    /// Base regular price.
    #[serde(with = "crate::money::major_units")]
    #[ts(type = "number")]
    pub price: Money,

    /// Base sale price.
    #[serde(with = "crate::money::major_units")]
    #[ts(type = "number")]
    pub sale_price: Money,

    /// Thumbnail URL, also the gallery fallback image.
    #[serde(default, deserialize_with = "nullable")]
    pub thumb: String,

    #[serde(default, deserialize_with = "nullable")]
    pub images: Vec<String>,

    /// Product-level stock (variants carry their own).
    #[serde(default)]
    pub quantity: i64,

    #[serde(default)]
    pub track_stock: bool,

    /// Currency the merchant prices this product in, when it overrides the
    /// storefront default.
    #[serde(default)]
    pub custom_currency: Option<String>,

    /// Variation axes in display order.
    #[serde(rename = "variations", default, deserialize_with = "nullable")]
    pub axes: Vec<VariationAxis>,

    #[serde(default, deserialize_with = "nullable")]
    pub variants: Vec<Variant>,

    #[serde(default, deserialize_with = "nullable")]
    pub reviews: Vec<Review>,
}

impl Product {
    /// Looks up an axis by name.
    pub fn axis(&self, name: &str) -> Option<&VariationAxis> {
        self.axes.iter().find(|a| a.name == name)
    }

    /// Looks up a variant by id.
    pub fn variant(&self, id: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == id)
    }

    /// Whether the base sale price undercuts the base regular price.
    pub fn has_discount(&self) -> bool {
        self.sale_price < self.price
    }
}

// =============================================================================
// Variation Axis
// =============================================================================

/// How the rendering layer presents an axis' options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    /// Swatch images (option value is an image URL).
    Image,
    /// Selectable buttons.
    #[default]
    Button,
    /// Plain text labels.
    Text,
}

/// A customization dimension such as "color" or "size".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VariationAxis {
    #[serde(default)]
    pub id: String,

    pub name: String,

    #[serde(rename = "type", default)]
    pub kind: AxisKind,

    /// Options in display order; names are unique within the axis.
    #[serde(rename = "props", default, deserialize_with = "nullable")]
    pub options: Vec<AxisOption>,
}

impl VariationAxis {
    pub fn option(&self, name: &str) -> Option<&AxisOption> {
        self.options.iter().find(|o| o.name == name)
    }
}

/// One selectable value within an axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AxisOption {
    #[serde(default)]
    pub id: String,

    /// Display name, also the value the selection stores.
    pub name: String,

    /// Raw value: a swatch color, or an image URL for image axes.
    #[serde(default)]
    pub value: Option<String>,
}

impl AxisOption {
    /// Returns the raw value when it is an absolute or root-relative URL.
    pub fn image_url(&self) -> Option<&str> {
        self.value
            .as_deref()
            .filter(|v| v.starts_with("http") || v.starts_with('/'))
    }
}

// =============================================================================
// Variant
// =============================================================================

/// A concrete purchasable combination of one option per axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Variant {
    pub id: String,

    #[serde(default)]
    pub product_id: String,

    #[serde(with = "crate::money::major_units")]
    #[ts(type = "number")]
    pub price: Money,

    #[serde(with = "crate::money::major_units")]
    #[ts(type = "number")]
    pub sale_price: Money,

    /// Units in stock.
    #[serde(default)]
    pub quantity: i64,

    /// Fulfilment partner code.
    #[serde(rename = "taager_code", default)]
    pub code: Option<String>,

    #[serde(rename = "variation_props", default, deserialize_with = "nullable")]
    pub tags: Vec<VariantTag>,
}

impl Variant {
    /// Whether this variant carries `value` for `axis`.
    pub fn has_value(&self, axis: &VariationAxis, value: &str) -> bool {
        self.tags.iter().any(|t| t.refers_to(axis) && t.value == value)
    }

    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }
}

/// One (axis, option value) pair on a variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VariantTag {
    /// Axis reference: the axis name or the axis id. Empty when the backend
    /// omits it.
    #[serde(rename = "variation", default, deserialize_with = "nullable")]
    pub axis: String,

    /// Option value as stored by the backend.
    #[serde(rename = "variation_prop")]
    pub value: String,
}

impl VariantTag {
    /// Whether this tag belongs to `axis`. An empty reference matches any
    /// axis, so value-only tags still resolve.
    pub fn refers_to(&self, axis: &VariationAxis) -> bool {
        self.axis.is_empty() || self.axis == axis.name || (!axis.id.is_empty() && self.axis == axis.id)
    }
}

// =============================================================================
// Review
// =============================================================================

/// A customer review embedded in the product document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Review {
    pub id: String,

    #[serde(default)]
    pub product_id: String,

    pub customer_name: String,

    /// Star rating, nominally 1-5.
    pub rating: u8,

    #[serde(default, deserialize_with = "nullable")]
    pub comment: String,

    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub created_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Unit Tests
// =============================================================================
