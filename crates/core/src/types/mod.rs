//! Core types for Bazaar.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod action;
pub mod id;
pub mod price;
pub mod product;
pub mod sort;
pub mod theme;

pub use action::{CartAction, Direction};
pub use id::*;
pub use price::Price;
pub use product::Product;
pub use sort::SortMode;
pub use theme::Theme;

/// Error returned when a wire string does not name a known variant.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseEnumError {
    /// What was being parsed (e.g. "sort mode").
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}
