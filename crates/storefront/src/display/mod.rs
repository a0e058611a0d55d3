//! Catalog filtering, sorting and rendering.
//!
//! [`visible_products`] is the pure part: it applies the search term, the
//! category filter and the sort mode to a slice of products. [`render`]
//! feeds the result to a [`RenderSurface`], which is the only side effect.

mod html;
mod surface;

use std::cmp::Ordering;

use bazaar_core::{Product, SortMode};
use thiserror::Error;

use crate::views::ProductCard;

pub use html::HtmlSurface;
pub use surface::{RenderSurface, TextSurface};

/// Message shown when no product survives filtering.
pub const NO_RESULTS: &str = "No products found.";

/// Rendering failed.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] askama::Error),
}

/// Category restriction applied to the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Wire value of the "no restriction" filter.
    pub const ALL: &'static str = "all";

    /// Parse a filter value: `"all"` or an exact category name.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value == Self::ALL {
            Self::All
        } else {
            Self::Only(value.to_owned())
        }
    }

    /// Whether a product in `category` passes the filter. Matching is exact.
    #[must_use]
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => Self::ALL,
            Self::Only(category) => category,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

/// Transient search, filter and sort parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayOptions {
    pub search_term: String,
    pub category: CategoryFilter,
    pub sort: SortMode,
}

impl DisplayOptions {
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    #[must_use]
    pub const fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }
}

/// Compare two names the way a collating UI would.
///
/// Case is ignored first; on a case-only tie lowercase sorts first.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Filter and sort `products` according to `options`.
///
/// A product is kept when its name contains the search term
/// (case-insensitive) and its category passes the filter. Sorting is
/// stable; `SortMode::Default` keeps the input order.
#[must_use]
pub fn visible_products<'a>(products: &'a [Product], options: &DisplayOptions) -> Vec<&'a Product> {
    let needle = options.search_term.to_lowercase();

    let mut visible: Vec<&Product> = products
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle) && options.category.matches(&p.category))
        .collect();

    match options.sort {
        SortMode::Default => {}
        SortMode::PriceAsc => visible.sort_by_key(|p| p.price),
        SortMode::PriceDesc => visible.sort_by(|a, b| b.price.cmp(&a.price)),
        SortMode::NameAsc => visible.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortMode::NameDesc => visible.sort_by(|a, b| compare_names(&b.name, &a.name)),
    }

    visible
}

/// Render the products visible under `options` onto `surface`.
///
/// The surface is cleared first. If nothing is visible a single
/// [`NO_RESULTS`] message is shown. Returns the number of cards rendered.
///
/// # Errors
///
/// Returns an error if the surface fails to render a card.
pub fn render<S>(surface: &mut S, products: &[Product], options: &DisplayOptions) -> Result<usize, RenderError>
where
    S: RenderSurface + ?Sized,
{
    surface.clear();

    let visible = visible_products(products, options);
    if visible.is_empty() {
        surface.show_empty(NO_RESULTS)?;
        return Ok(0);
    }

    for product in &visible {
        surface.push_card(&ProductCard::from(*product))?;
    }

    Ok(visible.len())
}
