//! Product types.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Products are immutable once fetched; the cart snapshots the fields it
/// needs rather than holding a reference back into the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Description for listings.
    pub description: String,
    /// Unit price (never negative).
    pub price: Money,
    /// Primary image URL.
    pub image: String,
    /// Smaller image for grids and drawers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb: Option<String>,
    /// Tags for filtering.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Product {
    /// Create a new product.
    ///
    /// Negative prices are raised to zero.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Money,
        image: impl Into<String>,
    ) -> Self {
        let price = if price.is_negative() {
            Money::zero(price.currency)
        } else {
            price
        };
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            price,
            image: image.into(),
            thumb: None,
            tags: Vec::new(),
        }
    }

    /// Set the thumbnail URL.
    pub fn with_thumb(mut self, thumb: impl Into<String>) -> Self {
        self.thumb = Some(thumb.into());
        self
    }

    /// Add a tag to this product.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
        self
    }

    /// Check if the product carries a tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// The image to use in compact listings, falling back to the primary image.
    pub fn thumbnail(&self) -> &str {
        self.thumb.as_deref().unwrap_or(&self.image)
    }
}
