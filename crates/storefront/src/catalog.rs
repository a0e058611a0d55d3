//! Product catalog.
//!
//! The catalog is immutable once built. It comes either from the built-in
//! demo products or from a JSON file (an array of products), which is
//! validated on load.

use std::collections::HashSet;
use std::path::Path;

use bazaar_core::{Product, ProductId};
use thiserror::Error;
use url::Url;

/// Errors raised while building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("product id must be positive (product {name:?})")]
    ZeroId { name: String },
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
    #[error("product {0} has an empty name")]
    EmptyName(ProductId),
    #[error("product {id} has an invalid image URL {image:?}: {source}")]
    InvalidImage {
        id: ProductId,
        image: String,
        #[source]
        source: url::ParseError,
    },
}

/// The fixed set of purchasable products, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// The demo catalog shipped with the storefront.
    #[must_use]
    pub fn builtin() -> Self {
        const IMG: &str = "https://images.unsplash.com/photo-";
        const Q: &str = "?auto=format&fit=crop&w=400&q=80";

        let products = [
            (1, "Wireless Headphones", 2400, "Electronics", "1517336714731-489689fd1ca8"),
            (2, "Sport Watch", 1999, "Wearables", "1511707171634-5f897ff02aa9"),
            (3, "Leather Wallet", 899, "Accessories", "1495482521147-b01eca30f7bf"),
            (4, "Sneakers", 3499, "Footwear", "1526170375885-4d8ecf77b99f"),
            (5, "Backpack", 2199, "Bags", "1463107971871-fbac9ddb920f"),
            (6, "Smartphone", 15999, "Electronics", "1510552776732-43bbf7e28e5e"),
            (7, "Sunglasses", 1299, "Accessories", "1508610048659-14f6b178c214"),
            (8, "Fitness Band", 2999, "Wearables", "1517363898876-6e2f6e9383dc"),
        ]
        .into_iter()
        .map(|(id, name, price, category, photo)| {
            Product::new(id, name, price, category, format!("{IMG}{photo}{Q}"))
        })
        .collect();

        Self { products }
    }

    /// Build a catalog from `products`, validating every record.
    ///
    /// # Errors
    ///
    /// Returns an error if an id is zero or repeated, a name is blank, or an
    /// image is not an absolute URL.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());

        for product in &products {
            if product.id.as_u32() == 0 {
                return Err(CatalogError::ZeroId {
                    name: product.name.clone(),
                });
            }
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
            if product.name.trim().is_empty() {
                return Err(CatalogError::EmptyName(product.id));
            }
            Url::parse(&product.image).map_err(|source| CatalogError::InvalidImage {
                id: product.id,
                image: product.image.clone(),
                source,
            })?;
        }

        Ok(Self { products })
    }

    /// Parse a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a product is invalid.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        Self::from_products(serde_json::from_str(raw)?)
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are invalid.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json(&raw)?;
        tracing::info!(path = %path.display(), products = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Distinct categories, in the order they first appear.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .map(|p| p.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
