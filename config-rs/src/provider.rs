//! Configuration providers
//!
//! Services read their settings through a [`ConfigProvider`] instead of
//! touching the process environment directly, so handlers can re-read
//! configuration per request and tests can swap in a fixed map.

use std::collections::HashMap;
use std::env;

use thiserror::Error;

/// Errors raised while interpreting configuration values
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing configuration key: {0}")]
    Missing(String),

    #[error("Invalid boolean value for key {key}: {value}")]
    InvalidBool { key: String, value: String },
}

/// Base trait for configuration providers
pub trait ConfigProvider: Send + Sync {
    /// Get a raw string value, `None` when the key is not set
    fn get_string(&self, key: &str) -> Option<String>;
}

/// Extension methods for configuration providers
pub trait ConfigProviderExt: ConfigProvider {
    /// Get a value that must be present and non-empty
    fn require(&self, key: &str) -> Result<String, ConfigError> {
        self.get_string(key)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::Missing(key.to_string()))
    }

    /// Get a boolean configuration value
    fn get_bool(&self, key: &str) -> Result<bool, ConfigError> {
        let value = self.require(key)?;
        match value.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" | "on" => Ok(true),
            "false" | "no" | "0" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidBool {
                key: key.to_string(),
                value,
            }),
        }
    }

    /// Get a boolean configuration value with a default
    fn get_bool_or(&self, key: &str, default: bool) -> bool {
        match self.get_bool(key) {
            Ok(value) => value,
            Err(ConfigError::Missing(_)) => default,
            Err(err) => {
                log::warn!("{}, using default {}", err, default);
                default
            }
        }
    }

    /// Get a string configuration value with a default
    fn get_string_or(&self, key: &str, default: &str) -> String {
        self.require(key).unwrap_or_else(|_| default.to_string())
    }

    /// First non-empty value among `keys`, in order
    fn get_first(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.require(key).ok())
    }
}

impl<T: ConfigProvider + ?Sized> ConfigProviderExt for T {}

/// Environment variable based configuration provider
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvConfigProvider;

impl EnvConfigProvider {
    /// Create a new environment variable config provider
    pub fn new() -> Self {
        Self
    }
}

impl ConfigProvider for EnvConfigProvider {
    fn get_string(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

/// Fixed in-memory configuration, mostly for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MapConfigProvider {
    values: HashMap<String, String>,
}

impl MapConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl ConfigProvider for MapConfigProvider {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

impl<K, V> FromIterator<(K, V)> for MapConfigProvider
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
