//! Application state assembled from configuration.

use std::rc::Rc;

use crate::cart::CartStore;
use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::controller::Controller;
use crate::error::Result;
use crate::storage::{FileStore, KeyValueStore};
use crate::theme::ThemePreference;

/// Everything a front end needs: configuration, the shared storage backend
/// and the controller owning the session state.
pub struct AppState {
    config: StorefrontConfig,
    storage: Rc<dyn KeyValueStore>,
    controller: Controller,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("controller", &self.controller)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create application state backed by the configured storage file.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file cannot be loaded or the storage
    /// file cannot be read.
    pub fn new(config: StorefrontConfig) -> Result<Self> {
        let storage: Rc<dyn KeyValueStore> = Rc::new(FileStore::open(config.storage_path())?);
        Self::with_storage(config, storage)
    }

    /// Create application state over an existing storage backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file cannot be loaded.
    pub fn with_storage(config: StorefrontConfig, storage: Rc<dyn KeyValueStore>) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::load(path)?,
            None => Catalog::builtin(),
        };
        let catalog = Rc::new(catalog);

        let cart = CartStore::load(Rc::clone(&catalog), Rc::clone(&storage));
        let theme = ThemePreference::resolve(Rc::clone(&storage), config.system_theme);
        let controller = Controller::new(catalog, cart, theme);

        tracing::debug!(
            products = controller.catalog().len(),
            cart_lines = controller.cart().entries().len(),
            "Application state ready"
        );

        Ok(Self {
            config,
            storage,
            controller,
        })
    }

    /// Get the storefront configuration.
    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Get the storage backend.
    #[must_use]
    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    #[must_use]
    pub const fn controller(&self) -> &Controller {
        &self.controller
    }

    pub const fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use bazaar_core::{ProductId, Theme};

    use super::*;
    use crate::error::StorefrontError;
    use crate::storage::{MemoryStore, keys};

    fn config() -> StorefrontConfig {
        StorefrontConfig {
            data_dir: PathBuf::from("unused"),
            ..StorefrontConfig::default()
        }
    }

    #[test]
    fn test_state_restores_cart_and_theme() {
        let storage = Rc::new(MemoryStore::with_entries([
            (keys::CART, r#"[{"id":3,"name":"Leather Wallet","price":899,"category":"Accessories","image":"https://example.com/w","qty":2}]"#),
            (keys::THEME, "dark"),
        ]));
        let state = AppState::with_storage(config(), storage).unwrap();

        let ctl = state.controller();
        assert_eq!(ctl.cart().get(ProductId::new(3)).unwrap().qty, 2);
        assert_eq!(ctl.theme().theme(), Theme::Dark);
        assert!(ctl.root().has_class("dark"));
    }

    #[test]
    fn test_missing_catalog_file_is_an_error() {
        let config = StorefrontConfig {
            catalog_path: Some(PathBuf::from("/nonexistent/catalog.json")),
            ..config()
        };
        let err = AppState::with_storage(config, Rc::new(MemoryStore::new())).unwrap_err();
        assert!(matches!(err, StorefrontError::Catalog(_)));
    }

    #[test]
    fn test_file_backed_state_persists() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorefrontConfig {
            data_dir: dir.path().to_path_buf(),
            ..config()
        };

        let mut state = AppState::new(config.clone()).unwrap();
        state.controller_mut().cart_mut().add(ProductId::new(8));

        let reopened = AppState::new(config).unwrap();
        assert_eq!(reopened.controller().summary().count, 1);
        assert!(reopened.storage().get(keys::CART).unwrap().is_some());
    }
}
