//! CLI command implementations.
//!
//! Commands write their output to a caller-supplied writer so they can be
//! exercised against a buffer.

pub mod cart;
pub mod catalog;
pub mod session;
pub mod theme;

use std::io;
use std::path::PathBuf;

use bazaar_core::ProductId;
use bazaar_storefront::display::RenderError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The product id is not in the catalog.
    #[error("Unknown product id: {0}")]
    UnknownProduct(ProductId),

    /// Writing an output file failed.
    #[error("Failed to write {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing to the terminal failed.
    #[error("Output error: {0}")]
    Output(#[from] io::Error),

    /// Rendering failed.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// JSON encoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
pub(crate) fn test_controller() -> bazaar_storefront::controller::Controller {
    use std::rc::Rc;

    use bazaar_storefront::cart::CartStore;
    use bazaar_storefront::catalog::Catalog;
    use bazaar_storefront::storage::MemoryStore;
    use bazaar_storefront::theme::ThemePreference;

    let catalog = Rc::new(Catalog::builtin());
    let storage = Rc::new(MemoryStore::new());
    let cart = CartStore::load(Rc::clone(&catalog), storage.clone());
    bazaar_storefront::controller::Controller::new(
        catalog,
        cart,
        ThemePreference::resolve(storage, None),
    )
}
