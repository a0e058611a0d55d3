//! Unified error handling.
//!
//! Provides a unified `StorefrontError` type for the fallible setup and
//! rendering paths. The cart path itself never fails: lookup misses are
//! no-ops and storage problems are logged.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::display::RenderError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Catalog could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Rendering failed.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

/// Result type alias for storefront operations.
pub type Result<T> = std::result::Result<T, StorefrontError>;
