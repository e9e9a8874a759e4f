//! # Product Gallery
//!
//! One image per color option, with a cursor the shopper moves through
//! thumbnails or previous / next arrows.
//!
//! ```text
//!    ◄ previous()                                     next() ►
//!   ┌────────┐ ┌────────┐ ┌────────┐ ┌────────┐
//!   │  Red   │ │ *Blue* │ │ Green  │ │ Black  │   select("Green")
//!   └────────┘ └────────┘ └────────┘ └────────┘
//!        ▲                                 │
//!        └──────────── wraps ──────────────┘
//! ```
//!
//! The gallery does not touch the resolver. The app layer keeps the two in
//! step: picking an image selects that color, picking a color moves the
//! cursor.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::Product;
use crate::variant::COLOR_AXIS;

/// One gallery slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GalleryImage {
    pub id: String,
    /// Color option name, or the URL itself for image-only galleries.
    pub name: String,
    /// Image URL.
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Gallery {
    pub images: Vec<GalleryImage>,
    /// Index into `images`; meaningless when `images` is empty.
    pub selected: usize,
}

impl Gallery {
    /// Builds the gallery for `product`.
    ///
    /// Color options become slots whose URL is the option value when that
    /// is a URL, else the product thumbnail. Products without a color axis
    /// fall back to their plain image list.
    pub fn from_product(product: &Product) -> Self {
        let images = match product.axis(COLOR_AXIS) {
            Some(color) if !color.options.is_empty() => color
                .options
                .iter()
                .map(|option| GalleryImage {
                    id: option.id.clone(),
                    name: option.name.clone(),
                    value: option
                        .image_url()
                        .unwrap_or(product.thumb.as_str())
                        .to_string(),
                })
                .collect(),
            _ => product
                .images
                .iter()
                .enumerate()
                .map(|(i, url)| GalleryImage {
                    id: i.to_string(),
                    name: url.clone(),
                    value: url.clone(),
                })
                .collect(),
        };

        Gallery {
            images,
            selected: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn selected(&self) -> Option<&GalleryImage> {
        self.images.get(self.selected)
    }

    /// Moves the cursor to the image named `name`. Unknown names leave the
    /// cursor where it is and return `None`.
    pub fn select(&mut self, name: &str) -> Option<&GalleryImage> {
        let index = self.images.iter().position(|i| i.name == name)?;
        self.selected = index;
        self.images.get(index)
    }

    pub fn next(&mut self) -> Option<&GalleryImage> {
        if self.images.is_empty() {
            return None;
        }
        self.selected = (self.selected + 1) % self.images.len();
        self.images.get(self.selected)
    }

    pub fn previous(&mut self) -> Option<&GalleryImage> {
        if self.images.is_empty() {
            return None;
        }
        let len = self.images.len();
        self.selected = (self.selected + len - 1) % len;
        self.images.get(self.selected)
    }
}
