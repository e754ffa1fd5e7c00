//! Storefront configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::persistence::STATE_KEY;

/// Storefront configuration file.
///
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Where the persisted snapshot lives.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Simulated latencies.
    #[serde(default)]
    pub latency: LatencyConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StoreConfig {
    /// Load config from a file.
    ///
    /// `.json` files are parsed as JSON, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}

/// Which key-value backend holds the snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local; nothing survives a restart.
    #[default]
    Memory,
    /// One file per key under `data_dir`.
    File,
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Key the snapshot is stored under.
    #[serde(default = "default_key")]
    pub key: String,

    /// Backend kind.
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory for the file backend.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: default_key(),
            backend: StorageBackend::default(),
            data_dir: default_data_dir(),
        }
    }
}

fn default_key() -> String {
    STATE_KEY.to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".turbo-store")
}

/// Simulated latencies, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyConfig {
    #[serde(default = "default_catalog_ms")]
    pub catalog_ms: u64,

    #[serde(default = "default_login_ms")]
    pub login_ms: u64,

    #[serde(default = "default_checkout_ms")]
    pub checkout_ms: u64,
}

impl LatencyConfig {
    /// All latencies zero.
    pub fn none() -> Self {
        Self {
            catalog_ms: 0,
            login_ms: 0,
            checkout_ms: 0,
        }
    }

    pub fn catalog(&self) -> Duration {
        Duration::from_millis(self.catalog_ms)
    }

    pub fn login(&self) -> Duration {
        Duration::from_millis(self.login_ms)
    }

    pub fn checkout(&self) -> Duration {
        Duration::from_millis(self.checkout_ms)
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            catalog_ms: default_catalog_ms(),
            login_ms: default_login_ms(),
            checkout_ms: default_checkout_ms(),
        }
    }
}

fn default_catalog_ms() -> u64 {
    turbo_commerce::catalog::DEFAULT_CATALOG_LATENCY.as_millis() as u64
}

fn default_login_ms() -> u64 {
    turbo_auth::DEFAULT_LOGIN_LATENCY.as_millis() as u64
}

fn default_checkout_ms() -> u64 {
    turbo_commerce::checkout::DEFAULT_CHECKOUT_LATENCY.as_millis() as u64
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}
