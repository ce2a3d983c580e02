//! # ShoeCart Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                    (Higher overrides lower)                             │
//! │                                                                         │
//! │  1. Environment Variables (highest)                                     │
//! │     SHOECART_API_URL=http://localhost:3333                              │
//! │     SHOECART_API_TIMEOUT_SECS=5                                         │
//! │     SHOECART_DATABASE_PATH=/var/lib/shoecart/cart.db                    │
//! │     SHOECART_STORAGE_KEY=@RocketShoes:cart                              │
//! │     SHOECART_CHECK_STOCK_ON_FIRST_ADD=true                              │
//! │                                                                         │
//! │  2. Config File (shoecart.toml)                                         │
//! │     --config PATH, else the platform config dir                         │
//! │                                                                         │
//! │  3. Default Values (lowest)                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [api]
//! base_url = "http://localhost:3333"
//! timeout_secs = 10
//!
//! [storage]
//! database_path = "/home/me/.local/share/shoecart/shoecart.db"
//! key = "@RocketShoes:cart"
//!
//! [cart]
//! check_stock_on_first_add = false
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shoecart_core::CART_STORAGE_KEY;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ConfigError, ConfigResult};
use crate::store::CartPolicy;

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "shoecart";
const APPLICATION: &str = "shoecart";

// =============================================================================
// API Settings
// =============================================================================

/// Product catalog / stock API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL; products live at `{base_url}/products/{id}`,
    /// stock at `{base_url}/stock/{id}`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:3333".to_string()
}

fn default_timeout() -> u64 {
    10
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Parses the base URL.
    pub fn url(&self) -> ConfigResult<Url> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(format!(
                "API URL must use http:// or https://, got: {}",
                self.base_url
            )));
        }
        if url.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl(format!(
                "API URL cannot be a base: {}",
                self.base_url
            )));
        }

        Ok(url)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

// =============================================================================
// Storage Settings
// =============================================================================

/// Where the cart slot is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite database file. Defaults to the platform data dir.
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Slot key the cart is stored under.
    #[serde(default = "default_storage_key")]
    pub key: String,
}

fn default_storage_key() -> String {
    CART_STORAGE_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            database_path: None,
            key: default_storage_key(),
        }
    }
}

// =============================================================================
// Cart Settings
// =============================================================================

/// Cart rule switches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSettings {
    /// Check stock before adding a product that is not yet in the cart.
    #[serde(default)]
    pub check_stock_on_first_add: bool,
}

impl From<&CartSettings> for CartPolicy {
    fn from(settings: &CartSettings) -> Self {
        CartPolicy {
            check_stock_on_first_add: settings.check_stock_on_first_add,
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete ShoeCart configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoeCartConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub cart: CartSettings,
}

impl ShoeCartConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`shoecart.toml`)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` that does not exist is an error; a missing
    /// file in the default location is not.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        match config_path {
            Some(path) => {
                info!(?path, "Loading config from file");
                config = Self::from_file(&path)?;
            }
            None => {
                if let Some(path) = Self::default_config_path() {
                    if path.exists() {
                        info!(?path, "Loading config from file");
                        config = Self::from_file(&path)?;
                    } else {
                        debug!(?path, "Config file not found, using defaults");
                    }
                }
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &std::path::Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoConfigPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        self.api.url()?;

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "api.timeout_secs must be greater than 0".into(),
            ));
        }

        if self.storage.key.trim().is_empty() {
            return Err(ConfigError::Invalid("storage.key must not be empty".into()));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies `SHOECART_*` overrides read through `lookup`.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("SHOECART_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(timeout) = lookup("SHOECART_API_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric SHOECART_API_TIMEOUT_SECS"),
            }
        }

        if let Some(path) = lookup("SHOECART_DATABASE_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.database_path = Some(PathBuf::from(path));
        }

        if let Some(key) = lookup("SHOECART_STORAGE_KEY") {
            self.storage.key = key;
        }

        if let Some(flag) = lookup("SHOECART_CHECK_STOCK_ON_FIRST_ADD") {
            match flag.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.cart.check_stock_on_first_add = true,
                "0" | "false" | "no" | "off" => self.cart.check_stock_on_first_add = false,
                _ => warn!(value = %flag, "Unknown SHOECART_CHECK_STOCK_ON_FIRST_ADD value"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .map(|dirs| dirs.config_dir().join("shoecart.toml"))
    }

    /// Returns the configured database path, falling back to the platform
    /// data dir.
    pub fn database_path(&self) -> Option<PathBuf> {
        self.storage.database_path.clone().or_else(|| {
            directories::ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
                .map(|dirs| dirs.data_dir().join("shoecart.db"))
        })
    }

    pub fn policy(&self) -> CartPolicy {
        CartPolicy::from(&self.cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = ShoeCartConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:3333");
        assert_eq!(config.api.timeout(), Duration::from_secs(10));
        assert_eq!(config.storage.key, "@RocketShoes:cart");
        assert!(!config.cart.check_stock_on_first_add);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ShoeCartConfig::default();

        config.api.base_url = "not a url".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidUrl(_))));

        config.api.base_url = "ftp://example.com".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidUrl(_))));

        config.api.base_url = "https://api.example.com/v1".to_string();
        assert!(config.validate().is_ok());

        config.api.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.api.timeout_secs = 3;
        config.storage.key = "  ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ShoeCartConfig = toml::from_str(
            r#"
            [api]
            base_url = "http://shoes.local:8080"

            [cart]
            check_stock_on_first_add = true
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "http://shoes.local:8080");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.storage.key, "@RocketShoes:cart");
        assert!(config.policy().check_stock_on_first_add);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SHOECART_API_URL", "http://10.0.0.2:3333"),
            ("SHOECART_API_TIMEOUT_SECS", "3"),
            ("SHOECART_DATABASE_PATH", "/tmp/cart.db"),
            ("SHOECART_CHECK_STOCK_ON_FIRST_ADD", "yes"),
        ]
        .into_iter()
        .collect();

        let mut config = ShoeCartConfig::default();
        config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://10.0.0.2:3333");
        assert_eq!(config.api.timeout_secs, 3);
        assert_eq!(config.database_path(), Some(PathBuf::from("/tmp/cart.db")));
        assert_eq!(config.storage.key, "@RocketShoes:cart");
        assert!(config.cart.check_stock_on_first_add);
    }

    #[test]
    fn test_bad_env_values_are_ignored() {
        let mut config = ShoeCartConfig::default();
        config.apply_overrides(|name| match name {
            "SHOECART_API_TIMEOUT_SECS" => Some("soon".to_string()),
            "SHOECART_CHECK_STOCK_ON_FIRST_ADD" => Some("maybe".to_string()),
            _ => None,
        });

        assert_eq!(config.api.timeout_secs, 10);
        assert!(!config.cart.check_stock_on_first_add);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join("shoecart.toml");

        let mut config = ShoeCartConfig::default();
        config.api.base_url = "http://127.0.0.1:9999".to_string();
        config.storage.database_path = Some(dir.path().join("cart.db"));
        config.save(Some(path.clone())).unwrap();

        let loaded = ShoeCartConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ShoeCartConfig::load(Some(dir.path().join("absent.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shoecart.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();

        assert!(matches!(
            ShoeCartConfig::from_file(&path),
            Err(ConfigError::Parse(_))
        ));
    }
}
