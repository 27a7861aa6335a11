//! Session configuration.

use gear_commerce::cart::ShippingPolicy;
use gear_commerce::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Could not read the config file.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Could not parse the config file.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Session configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Storefront API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Local storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Server sync settings.
    #[serde(default)]
    pub sync: SyncConfig,

    /// Pricing settings.
    #[serde(default)]
    pub pricing: PricingConfig,
}

impl SessionConfig {
    /// Load config from a TOML file. A missing file means defaults; a
    /// present-but-invalid file is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path.as_ref()) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        Ok(toml::from_str(&content)?)
    }

    /// The shipping policy these settings describe.
    pub fn shipping_policy(&self) -> ShippingPolicy {
        let currency = self.pricing.currency;
        ShippingPolicy::new(
            Money::new(self.pricing.shipping_flat_fee, currency),
            Money::new(self.pricing.free_shipping_threshold, currency),
        )
    }

    /// The debounce window for server writes.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.sync.debounce_ms)
    }
}

/// Storefront API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the storefront services. None disables the remote
    /// backend entirely (guest-only mode).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Bearer token for authenticated requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,

    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            bearer_token: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    10_000
}

/// Local storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the cart document.
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
        }
    }
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".gearcart")
}

/// Server sync settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Debounce window for server cart writes, in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    1000
}

/// Pricing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Settlement currency.
    #[serde(default)]
    pub currency: Currency,

    /// Flat shipping fee in minor units.
    #[serde(default = "default_flat_fee")]
    pub shipping_flat_fee: i64,

    /// Selected subtotal (minor units) at which shipping is free.
    #[serde(default = "default_free_threshold")]
    pub free_shipping_threshold: i64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            shipping_flat_fee: default_flat_fee(),
            free_shipping_threshold: default_free_threshold(),
        }
    }
}

fn default_flat_fee() -> i64 {
    30_000
}

fn default_free_threshold() -> i64 {
    500_000
}
