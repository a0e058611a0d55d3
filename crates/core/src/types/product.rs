//! Catalog product record.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A purchasable product.
///
/// Products are defined ahead of time and never change at runtime. The
/// image field also accepts the legacy key `img` when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub category: String,
    #[serde(alias = "img")]
    pub image: String,
}

impl Product {
    /// Create a new product.
    #[must_use]
    pub fn new(
        id: u32,
        name: impl Into<String>,
        price: u64,
        category: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.into(),
            price: Price::new(price),
            category: category.into(),
            image: image.into(),
        }
    }
}
