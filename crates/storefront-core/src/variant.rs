//! # Variant Resolver
//!
//! Owns the displayed product, the shopper's per-axis selections and the
//! variant those selections resolve to.
//!
//! ## Resolution Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Variant Resolution                                  │
//! │                                                                         │
//! │  set_product(P) ──► selection = first option of every axis             │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  set_selection("color", "Blue") ──► selection["color"] = "Blue"        │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  resolve()                                                      │   │
//! │  │  1. every axis has a selection?              no ──► None        │   │
//! │  │  2. every selection is an offered option?    no ──► None        │   │
//! │  │  3. normalize per CasePolicy ("Blue" → "blue" when Lowercase)  │   │
//! │  │  4. first variant tagged with every (axis, value)  ──► Some(v)  │   │
//! │  │                                              none ──► None      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  clear_selection() ──► selection = {}, resolved = None                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshots
//! State lives behind an `Arc<DetailsSnapshot>`. Mutations go through
//! `Arc::make_mut`, so a reader holding a snapshot keeps a consistent view
//! while the resolver moves on.
//!
//! ## Example
//! ```rust
//! use storefront_core::variant::VariantResolver;
//! # use storefront_core::types::Product;
//! # let product: Product = serde_json::from_str(r#"{
//! #   "id": "p1", "name": "Tee", "price": 50, "sale_price": 40,
//! #   "variations": [{"name": "size", "props": [{"name": "M"}, {"name": "L"}]}],
//! #   "variants": [{"id": "v-m", "price": 50, "sale_price": 40,
//! #                 "variation_props": [{"variation": "size", "variation_prop": "M"}]}]
//! # }"#).unwrap();
//!
//! let mut resolver = VariantResolver::default();
//! resolver.set_product(product);
//! assert_eq!(resolver.resolved_variant().map(|v| v.id.as_str()), Some("v-m"));
//!
//! resolver.set_selection("size", "L");
//! assert!(resolver.resolved_variant().is_none());
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::cart::{CartCandidate, SelectedOption};
use crate::money::Money;
use crate::types::{AxisOption, Product, Variant, VariationAxis};

/// Axis name conventionally holding colors (drives the gallery and the cart
/// line image).
pub const COLOR_AXIS: &str = "color";

/// Axis name conventionally holding sizes.
pub const SIZE_AXIS: &str = "size";

/// Axis name → selected option name.
pub type Selection = BTreeMap<String, String>;

// =============================================================================
// Configuration
// =============================================================================

/// How a selected option name is compared with variant tag values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CasePolicy {
    /// Compare as-is.
    #[default]
    Exact,
    /// Lower-case the selected option name before comparing. For backends
    /// that store an axis' tags lower-cased while displaying capitalized
    /// option names.
    Lowercase,
}

impl CasePolicy {
    fn normalize(self, value: &str) -> String {
        match self {
            CasePolicy::Exact => value.to_string(),
            CasePolicy::Lowercase => value.to_lowercase(),
        }
    }
}

/// Per-axis matching rules. Axes without an entry use [`CasePolicy::Exact`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverConfig {
    case_policies: BTreeMap<String, CasePolicy>,
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the case policy for one axis.
    pub fn with_case_policy(mut self, axis: impl Into<String>, policy: CasePolicy) -> Self {
        self.case_policies.insert(axis.into(), policy);
        self
    }

    /// Marks every named axis as [`CasePolicy::Lowercase`].
    ///
    /// ```rust
    /// use storefront_core::variant::{CasePolicy, ResolverConfig};
    ///
    /// let config = ResolverConfig::lowercase_axes(["color"]);
    /// assert_eq!(config.case_policy("color"), CasePolicy::Lowercase);
    /// assert_eq!(config.case_policy("size"), CasePolicy::Exact);
    /// ```
    pub fn lowercase_axes<I, S>(axes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        axes.into_iter().fold(Self::default(), |config, axis| {
            config.with_case_policy(axis, CasePolicy::Lowercase)
        })
    }

    pub fn case_policy(&self, axis: &str) -> CasePolicy {
        self.case_policies.get(axis).copied().unwrap_or_default()
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// An immutable view of the details state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailsSnapshot {
    product: Option<Product>,
    selection: Selection,
    /// Index into `product.variants`.
    resolved: Option<usize>,
}

impl DetailsSnapshot {
    pub fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }

    /// Axes of the current product in display order (empty without one).
    pub fn axes(&self) -> &[VariationAxis] {
        self.product
            .as_ref()
            .map(|p| p.axes.as_slice())
            .unwrap_or_default()
    }

    /// Selectable options for `axis`; empty when the axis is absent.
    pub fn options(&self, axis: &str) -> &[AxisOption] {
        self.product
            .as_ref()
            .and_then(|p| p.axis(axis))
            .map(|a| a.options.as_slice())
            .unwrap_or_default()
    }

    pub fn colors(&self) -> &[AxisOption] {
        self.options(COLOR_AXIS)
    }

    pub fn sizes(&self) -> &[AxisOption] {
        self.options(SIZE_AXIS)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected(&self, axis: &str) -> Option<&str> {
        self.selection.get(axis).map(String::as_str)
    }

    /// Whether every axis of the current product has a selection.
    pub fn is_selection_complete(&self) -> bool {
        let axes = self.axes();
        !axes.is_empty() && axes.iter().all(|a| self.selection.contains_key(&a.name))
    }

    pub fn resolved_variant(&self) -> Option<&Variant> {
        let index = self.resolved?;
        self.product.as_ref()?.variants.get(index)
    }

    /// Regular price to display: the resolved variant's, else the product's.
    pub fn display_price(&self) -> Option<Money> {
        self.resolved_variant()
            .map(|v| v.price)
            .or_else(|| self.product.as_ref().map(|p| p.price))
    }

    /// Sale price to display: the resolved variant's, else the product's.
    pub fn display_sale_price(&self) -> Option<Money> {
        self.resolved_variant()
            .map(|v| v.sale_price)
            .or_else(|| self.product.as_ref().map(|p| p.sale_price))
    }

    /// Whole-percent saving of the displayed sale price over the displayed
    /// regular price.
    pub fn discount_percent(&self) -> u32 {
        match (self.display_price(), self.display_sale_price()) {
            (Some(regular), Some(sale)) => Money::discount_percent(regular, sale),
            _ => 0,
        }
    }

    /// Stock of the resolved variant.
    pub fn stock(&self) -> Option<i64> {
        self.resolved_variant().map(|v| v.quantity)
    }

    /// Builds the cart candidate for the current resolution.
    ///
    /// Returns `None` without a resolved variant. Axis values are listed in
    /// the product's axis order, which fixes the line item identifier.
    pub fn cart_candidate(&self, quantity: i64) -> Option<CartCandidate> {
        let product = self.product.as_ref()?;
        let variant = self.resolved_variant()?;

        let options = product
            .axes
            .iter()
            .filter_map(|axis| {
                self.selection.get(&axis.name).map(|value| SelectedOption {
                    axis: axis.name.clone(),
                    value: value.clone(),
                })
            })
            .collect();

        let image = self
            .selected(COLOR_AXIS)
            .and_then(|color| product.axis(COLOR_AXIS)?.option(color))
            .and_then(AxisOption::image_url)
            .unwrap_or(product.thumb.as_str())
            .to_string();

        Some(CartCandidate {
            product_id: product.id.clone(),
            variant_id: variant.id.clone(),
            product_name: product.name.clone(),
            product_image: image,
            options,
            unit_price: variant.price,
            unit_sale_price: variant.sale_price,
            quantity,
        })
    }

    fn resolve(&self, config: &ResolverConfig) -> Option<usize> {
        let product = self.product.as_ref()?;
        if product.axes.is_empty() {
            return None;
        }

        let mut wanted = Vec::with_capacity(product.axes.len());
        for axis in &product.axes {
            let selected = self.selection.get(&axis.name)?;
            axis.option(selected)?;
            wanted.push((axis, config.case_policy(&axis.name).normalize(selected)));
        }

        // first listed variant wins when the source repeats a combination
        product
            .variants
            .iter()
            .position(|variant| wanted.iter().all(|(axis, value)| variant.has_value(axis, value)))
    }
}

// =============================================================================
// Resolver
// =============================================================================

/// The product-details state owner.
#[derive(Debug, Clone, Default)]
pub struct VariantResolver {
    config: ResolverConfig,
    state: Arc<DetailsSnapshot>,
}

impl VariantResolver {
    pub fn new(config: ResolverConfig) -> Self {
        VariantResolver {
            config,
            state: Arc::default(),
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Current state. Cheap to clone and safe to hold across mutations.
    pub fn snapshot(&self) -> Arc<DetailsSnapshot> {
        Arc::clone(&self.state)
    }

    /// Borrowed view of the current state.
    pub fn state(&self) -> &DetailsSnapshot {
        &self.state
    }

    pub fn product(&self) -> Option<&Product> {
        self.state.product()
    }

    pub fn options(&self, axis: &str) -> &[AxisOption] {
        self.state.options(axis)
    }

    pub fn selection(&self) -> &Selection {
        self.state.selection()
    }

    pub fn resolved_variant(&self) -> Option<&Variant> {
        self.state.resolved_variant()
    }

    /// Replaces the product and selects the first option of every axis.
    pub fn set_product(&mut self, product: Product) {
        let selection = product
            .axes
            .iter()
            .filter_map(|axis| {
                axis.options
                    .first()
                    .map(|first| (axis.name.clone(), first.name.clone()))
            })
            .collect();

        let mut next = DetailsSnapshot {
            product: Some(product),
            selection,
            resolved: None,
        };
        next.resolved = next.resolve(&self.config);
        self.state = Arc::new(next);
    }

    /// Selects `option` on `axis` and re-resolves.
    ///
    /// Axes the current product does not define are ignored. Returns the
    /// variant the new selection resolves to.
    pub fn set_selection(&mut self, axis: &str, option: &str) -> Option<&Variant> {
        let known = self.state.axes().iter().any(|a| a.name == axis);
        if known {
            let config = &self.config;
            let state = Arc::make_mut(&mut self.state);
            state.selection.insert(axis.to_string(), option.to_string());
            state.resolved = state.resolve(config);
        }
        self.state.resolved_variant()
    }

    /// Empties the selection. Option lists stay with the product.
    pub fn clear_selection(&mut self) {
        let state = Arc::make_mut(&mut self.state);
        state.selection.clear();
        state.resolved = None;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
