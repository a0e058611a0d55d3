//! Render targets for the catalog.

use super::RenderError;
use crate::views::ProductCard;

/// A container the catalog is rendered into.
///
/// [`render`](super::render) always calls [`clear`](Self::clear) first and
/// then either one [`show_empty`](Self::show_empty) or one
/// [`push_card`](Self::push_card) per visible product.
pub trait RenderSurface {
    /// Remove everything previously rendered.
    fn clear(&mut self);

    /// Show the empty-state message.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface fails to render the message.
    fn show_empty(&mut self, message: &str) -> Result<(), RenderError>;

    /// Append one product card.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface fails to render the card.
    fn push_card(&mut self, card: &ProductCard) -> Result<(), RenderError>;
}

/// Plain-text listing, one line per card.
#[derive(Debug, Default, Clone)]
pub struct TextSurface {
    lines: Vec<String>,
}

impl TextSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Rendered lines joined with newlines.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

impl RenderSurface for TextSurface {
    fn clear(&mut self) {
        self.lines.clear();
    }

    fn show_empty(&mut self, message: &str) -> Result<(), RenderError> {
        self.lines.push(message.to_owned());
        Ok(())
    }

    fn push_card(&mut self, card: &ProductCard) -> Result<(), RenderError> {
        self.lines.push(format!(
            "[{:>3}] {:<24} {:<12} {:>10}",
            card.id.as_u32(),
            card.name,
            card.category,
            card.price
        ));
        Ok(())
    }
}
