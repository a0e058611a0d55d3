//! HTML render target backed by askama templates.

use askama::Template;

use super::{RenderError, RenderSurface};
use crate::views::ProductCard;

/// Product card fragment.
#[derive(Template)]
#[template(path = "partials/product_card.html")]
struct ProductCardTemplate<'a> {
    card: &'a ProductCard,
}

/// Empty-state fragment.
#[derive(Template)]
#[template(path = "partials/no_results.html")]
struct NoResultsTemplate<'a> {
    message: &'a str,
}

/// Accumulates rendered HTML fragments for the product grid.
#[derive(Debug, Default, Clone)]
pub struct HtmlSurface {
    html: String,
}

impl HtmlSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The rendered grid contents.
    #[must_use]
    pub fn as_html(&self) -> &str {
        &self.html
    }
}

impl RenderSurface for HtmlSurface {
    fn clear(&mut self) {
        self.html.clear();
    }

    fn show_empty(&mut self, message: &str) -> Result<(), RenderError> {
        NoResultsTemplate { message }.render_into(&mut self.html)?;
        Ok(())
    }

    fn push_card(&mut self, card: &ProductCard) -> Result<(), RenderError> {
        ProductCardTemplate { card }.render_into(&mut self.html)?;
        self.html.push('\n');
        Ok(())
    }
}
