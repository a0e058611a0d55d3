//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `BAZAAR_DATA_DIR` - Directory holding the storage file (default: platform data dir)
//! - `BAZAAR_CATALOG` - JSON catalog file replacing the built-in products
//! - `BAZAAR_SYSTEM_THEME` - System color scheme, `dark` or `light`
//! - `BAZAAR_LOG_FORMAT` - `text` (default) or `json`
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name (default: development)

use std::path::PathBuf;
use std::str::FromStr;

use bazaar_core::Theme;
use thiserror::Error;

/// Name of the storage file inside the data directory.
pub const STORAGE_FILE: &str = "storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `text` or `json`, got {other:?}")),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory holding the storage file
    pub data_dir: PathBuf,
    /// Optional catalog file
    pub catalog_path: Option<PathBuf>,
    /// Color scheme reported by the system, if any
    pub system_theme: Option<Theme>,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: String,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            catalog_path: None,
            system_theme: None,
            log_format: LogFormat::default(),
            sentry_dsn: None,
            sentry_environment: "development".to_string(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir =
            get_optional_env("BAZAAR_DATA_DIR").map_or_else(default_data_dir, PathBuf::from);
        let catalog_path = get_optional_env("BAZAAR_CATALOG").map(PathBuf::from);
        let system_theme = get_optional_env("BAZAAR_SYSTEM_THEME")
            .map(|value| parse_var::<Theme>("BAZAAR_SYSTEM_THEME", &value))
            .transpose()?;
        let log_format = parse_var(
            "BAZAAR_LOG_FORMAT",
            &get_env_or_default("BAZAAR_LOG_FORMAT", "text"),
        )?;

        Ok(Self {
            data_dir,
            catalog_path,
            system_theme,
            log_format,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_env_or_default("SENTRY_ENVIRONMENT", "development"),
        })
    }

    /// Path of the file-backed key-value store.
    #[must_use]
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(STORAGE_FILE)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Platform data directory for Bazaar, falling back to `.bazaar`.
fn default_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from(".bazaar"), |dir| dir.join("bazaar"))
}

/// Get an optional environment variable. Empty values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse a variable's value, naming the variable in the error.
fn parse_var<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
