//! Integration tests for Bazaar.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bazaar-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_session` - Whole sessions against the file-backed store
//! - `storefront_persistence` - Storage file contents across restarts
//! - `storefront_catalog` - Catalog files and page rendering
//!
//! Every test runs in its own temporary data directory, so tests never
//! touch the user's real storage file.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;

use bazaar_storefront::config::StorefrontConfig;
use bazaar_storefront::controller::Prompt;
use bazaar_storefront::state::AppState;
use tempfile::TempDir;

/// A temporary data directory plus the configuration pointing at it.
pub struct TestContext {
    dir: TempDir,
    config: StorefrontConfig,
}

impl TestContext {
    /// Create a context with an empty data directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp data dir");
        let config = StorefrontConfig {
            data_dir: dir.path().to_path_buf(),
            ..StorefrontConfig::default()
        };
        Self { dir, config }
    }

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub const fn config_mut(&mut self) -> &mut StorefrontConfig {
        &mut self.config
    }

    /// Start the storefront, as a fresh process would.
    ///
    /// # Panics
    ///
    /// Panics if the state cannot be built.
    #[must_use]
    pub fn start(&self) -> AppState {
        AppState::new(self.config.clone()).expect("build app state")
    }

    #[must_use]
    pub fn storage_path(&self) -> PathBuf {
        self.config.storage_path()
    }

    /// Raw contents of the storage file, if it exists.
    #[must_use]
    pub fn read_storage(&self) -> Option<String> {
        fs::read_to_string(self.storage_path()).ok()
    }

    /// Replace the storage file.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn write_storage(&self, contents: &str) {
        fs::write(self.storage_path(), contents).expect("write storage file");
    }

    /// Write a catalog file into the data directory and point the config
    /// at it.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn use_catalog(&mut self, contents: &str) {
        let path = self.dir.path().join("catalog.json");
        fs::write(&path, contents).expect("write catalog file");
        self.config.catalog_path = Some(path);
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Dialogs answered from a script, recording every message shown.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<bool>,
    pub alerts: Vec<String>,
    pub confirms: Vec<String>,
}

impl ScriptedPrompt {
    /// A prompt answering confirmations with `answers`, in order. Once the
    /// script runs out every confirmation is declined.
    #[must_use]
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_owned());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.confirms.push(message.to_owned());
        self.answers.pop_front().unwrap_or(false)
    }
}
