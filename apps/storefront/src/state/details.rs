//! # Details State
//!
//! Owns the product-details panel: the variant resolver, the image gallery
//! and the fetch generation counter.
//!
//! ## Stale Fetches
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Out-of-order completions                             │
//! │                                                                         │
//! │  load_product("A") ── begin_fetch() = 1 ──┐                            │
//! │  load_product("B") ── begin_fetch() = 2 ──┼──┐                         │
//! │                                           │  │                          │
//! │                      B completes ◄────────┼──┘ apply(2, B)  ✓ current  │
//! │                      A completes ◄────────┘    apply(1, A)  ✗ dropped  │
//! │                                                                         │
//! │  Only the completion holding the latest ticket reaches the resolver.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! Resolver and gallery sit behind one `RwLock` so they move together. No
//! lock is held across an `.await`: the fetch happens before `apply_fetched`
//! takes the write lock.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use storefront_core::variant::COLOR_AXIS;
use storefront_core::{
    CartCandidate, DetailsSnapshot, Gallery, Product, ResolverConfig, VariantResolver,
};
use tracing::debug;

#[derive(Debug, Default)]
struct Details {
    resolver: VariantResolver,
    gallery: Gallery,
}

impl Details {
    /// Moves the gallery cursor to the selected color, if any.
    fn sync_gallery(&mut self) {
        if let Some(color) = self.resolver.state().selected(COLOR_AXIS) {
            let color = color.to_string();
            self.gallery.select(&color);
        }
    }

    /// Selects the color the gallery cursor points at.
    fn sync_selection(&mut self) {
        let has_color_axis = self.resolver.state().product().and_then(|p| p.axis(COLOR_AXIS)).is_some();
        if !has_color_axis {
            return;
        }
        if let Some(image) = self.gallery.selected() {
            let name = image.name.clone();
            self.resolver.set_selection(COLOR_AXIS, &name);
        }
    }
}

/// Product-details state owner.
#[derive(Debug, Default)]
pub struct DetailsState {
    inner: RwLock<Details>,
    generation: AtomicU64,
}

impl DetailsState {
    pub fn new(config: ResolverConfig) -> Self {
        DetailsState {
            inner: RwLock::new(Details {
                resolver: VariantResolver::new(config),
                gallery: Gallery::default(),
            }),
            generation: AtomicU64::new(0),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Details> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Details> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // Fetch generations
    // =========================================================================

    /// Takes a ticket for a fetch that is about to start. Any older ticket
    /// stops being current.
    pub fn begin_fetch(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket
    }

    /// Installs a fetched product if `ticket` is still current.
    ///
    /// Returns `false` (and changes nothing) for stale completions.
    pub fn apply_fetched(&self, ticket: u64, product: Product) -> bool {
        let mut details = self.write();
        // ticket check and install share one write lock
        if !self.is_current(ticket) {
            debug!(ticket, product_id = %product.id, "Dropping stale product fetch");
            return false;
        }

        details.gallery = Gallery::from_product(&product);
        details.resolver.set_product(product);
        details.sync_gallery();
        true
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn snapshot(&self) -> Arc<DetailsSnapshot> {
        self.read().resolver.snapshot()
    }

    pub fn gallery(&self) -> Gallery {
        self.read().gallery.clone()
    }

    /// Snapshot and gallery taken under one lock.
    pub fn view(&self) -> (Arc<DetailsSnapshot>, Gallery) {
        let details = self.read();
        (details.resolver.snapshot(), details.gallery.clone())
    }

    pub fn cart_candidate(&self, quantity: i64) -> Option<CartCandidate> {
        self.read().resolver.state().cart_candidate(quantity)
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Selects `option` on `axis`. Picking a color also moves the gallery.
    pub fn select_variation(&self, axis: &str, option: &str) {
        let mut details = self.write();
        let resolved = details
            .resolver
            .set_selection(axis, option)
            .map(|v| v.id.clone());
        debug!(axis = %axis, option = %option, resolved = ?resolved, "Selection changed");

        if axis == COLOR_AXIS {
            details.gallery.select(option);
        }
    }

    pub fn clear_selection(&self) {
        self.write().resolver.clear_selection();
    }

    /// Points the gallery at `name` and selects that color. Returns whether
    /// the image exists.
    pub fn select_image(&self, name: &str) -> bool {
        let mut details = self.write();
        if details.gallery.select(name).is_none() {
            return false;
        }
        details.sync_selection();
        true
    }

    pub fn next_image(&self) {
        let mut details = self.write();
        if details.gallery.next().is_some() {
            details.sync_selection();
        }
    }

    pub fn previous_image(&self) {
        let mut details = self.write();
        if details.gallery.previous().is_some() {
            details.sync_selection();
        }
    }
}
