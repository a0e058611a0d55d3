//! Display data for templates and terminal output.

use std::fmt;

use bazaar_core::{Price, Product, ProductId};

use crate::cart::{CartEntry, CartStore};

/// Message shown in the line list when the cart is empty.
pub const EMPTY_CART: &str = "Your cart is empty.";

/// Product card display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: String,
    pub image: String,
}

impl ProductCard {
    /// Accessible label of the add button.
    #[must_use]
    pub fn add_label(&self) -> String {
        format!("Add {} to cart", self.name)
    }
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price.to_string(),
            image: product.image.clone(),
        }
    }
}

/// One cart line with its controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    pub id: ProductId,
    pub name: String,
    pub qty: u32,
    pub line_total: String,
}

impl From<&CartEntry> for CartLineView {
    fn from(entry: &CartEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name.clone(),
            qty: entry.qty,
            line_total: entry.line_total().to_string(),
        }
    }
}

/// Cart sidebar display data: badge count, lines and total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
    pub count: u64,
    pub lines: Vec<CartLineView>,
    pub total: Price,
}

impl CartSummary {
    /// Checkout and empty-cart controls are only enabled with items.
    #[must_use]
    pub fn controls_enabled(&self) -> bool {
        !self.lines.is_empty()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn total_display(&self) -> String {
        self.total.to_string()
    }
}

impl From<&CartStore> for CartSummary {
    fn from(cart: &CartStore) -> Self {
        Self {
            count: cart.count(),
            lines: cart.entries().iter().map(CartLineView::from).collect(),
            total: cart.total(),
        }
    }
}

impl fmt::Display for CartSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cart ({} items)", self.count)?;
        if self.lines.is_empty() {
            writeln!(f, "  {EMPTY_CART}")?;
        }
        for line in &self.lines {
            writeln!(
                f,
                "  [{:>3}] {:<24} x{:<3} {:>10}",
                line.id.as_u32(),
                line.name,
                line.qty,
                line.line_total
            )?;
        }
        write!(f, "Total: {}", self.total)
    }
}
