//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`LEGACYFRAME_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;

use legacyframe_core::Money;
use serde::{Deserialize, Serialize};

/// Selects the storage backend (`file` or `memory`).
pub const ENV_STORAGE: &str = "LEGACYFRAME_STORAGE";
/// Overrides the directory used by the file backend.
pub const ENV_STORAGE_DIR: &str = "LEGACYFRAME_STORAGE_DIR";
/// Shared secret for verifying auth tokens.
pub const ENV_JWT_SECRET: &str = "LEGACYFRAME_JWT_SECRET";
pub const ENV_STORE_NAME: &str = "LEGACYFRAME_STORE_NAME";
pub const ENV_CURRENCY_SYMBOL: &str = "LEGACYFRAME_CURRENCY_SYMBOL";
pub const ENV_CURRENCY_DECIMALS: &str = "LEGACYFRAME_CURRENCY_DECIMALS";

/// Largest number of currency decimal places accepted.
const MAX_CURRENCY_DECIMALS: u8 = 4;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name (page titles, order emails)
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Where the cart slot lives
    pub storage: StorageBackend,

    /// Slot directory for the file backend.
    /// Default: platform data directory
    pub storage_dir: Option<PathBuf>,

    /// HS256 secret; when absent tokens are read without verification.
    /// Never sent to page components.
    #[serde(skip_serializing, default)]
    pub jwt_secret: Option<String>,
}

/// Durable slot backend.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file per slot in the storage directory
    #[default]
    File,

    /// Process memory only; the cart is lost on restart
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StorageBackend::File),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(invalid(ENV_STORAGE, s)),
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    #[error("Could not determine app data directory")]
    NoDataDirectory,
}

impl Default for ConfigState {
    /// Returns default configuration suitable for development.
    ///
    /// ## Default Values
    /// - Store: "Legacyframe"
    /// - Currency: KRW (₩, no decimals)
    /// - Storage: file, in the platform data directory
    /// - Tokens: read without signature verification
    fn default() -> Self {
        ConfigState {
            store_name: "Legacyframe".to_string(),
            currency_symbol: "₩".to_string(),
            currency_decimals: 0,
            storage: StorageBackend::File,
            storage_dir: None,
            jwt_secret: None,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates a ConfigState from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = ConfigState::default();

        if let Some(store_name) = get(ENV_STORE_NAME) {
            config.store_name = store_name;
        }

        if let Some(symbol) = get(ENV_CURRENCY_SYMBOL) {
            config.currency_symbol = symbol;
        }

        if let Some(raw) = get(ENV_CURRENCY_DECIMALS) {
            config.currency_decimals = raw
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|decimals| *decimals <= MAX_CURRENCY_DECIMALS)
                .ok_or_else(|| invalid(ENV_CURRENCY_DECIMALS, &raw))?;
        }

        if let Some(raw) = get(ENV_STORAGE) {
            config.storage = raw.parse()?;
        }

        config.storage_dir = get(ENV_STORAGE_DIR).map(PathBuf::from);
        config.jwt_secret = get(ENV_JWT_SECRET);

        Ok(config)
    }

    /// Directory for the file backend: the override, else the platform
    /// data directory.
    pub fn resolve_storage_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.storage_dir {
            Some(dir) => Ok(dir.clone()),
            None => crate::default_data_dir().ok_or(ConfigError::NoDataDirectory),
        }
    }

    /// Formats an amount with the configured symbol and decimals.
    ///
    /// ## Example
    /// ```rust
    /// use legacyframe_core::Money;
    /// use legacyframe_storefront::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::new(40000)), "₩40000");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        amount.format(&self.currency_symbol, self.currency_decimals)
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}
