//! CLI configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use brew_commerce::checkout::{DEFAULT_SETTLEMENT_LATENCY, DEFAULT_SETTLEMENT_TIMEOUT};
use brew_commerce::rewards::{DEFAULT_NEXT_REWARD, DEFAULT_POINTS};
use serde::{Deserialize, Serialize};

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["brewspot.toml", ".brewspot.toml", "brewspot.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrewConfig {
    /// Where the cart and favorites live.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Checkout configuration.
    #[serde(default)]
    pub checkout: CheckoutConfig,

    /// Menu source.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Loyalty balance shown by `brewspot rewards`.
    #[serde(default)]
    pub rewards: RewardsConfig,
}

impl BrewConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage directory. Relative paths are resolved against the directory
    /// holding the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

/// Checkout configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// How long the simulated gateway takes to approve a payment.
    #[serde(default = "default_latency_ms")]
    pub settlement_latency_ms: u64,

    /// Give up on a settlement after this long.
    #[serde(default = "default_timeout_ms")]
    pub settlement_timeout_ms: u64,
}

fn default_latency_ms() -> u64 {
    DEFAULT_SETTLEMENT_LATENCY.as_millis() as u64
}

fn default_timeout_ms() -> u64 {
    DEFAULT_SETTLEMENT_TIMEOUT.as_millis() as u64
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            settlement_latency_ms: default_latency_ms(),
            settlement_timeout_ms: default_timeout_ms(),
        }
    }
}

impl CheckoutConfig {
    pub fn settlement_latency(&self) -> Duration {
        Duration::from_millis(self.settlement_latency_ms)
    }

    pub fn settlement_timeout(&self) -> Duration {
        Duration::from_millis(self.settlement_timeout_ms)
    }
}

/// Catalog configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Menu JSON file. The built-in menu is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Rewards configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardsConfig {
    #[serde(default = "default_points")]
    pub points: u32,

    #[serde(default = "default_next_reward")]
    pub next_reward: u32,
}

fn default_points() -> u32 {
    DEFAULT_POINTS
}

fn default_next_reward() -> u32 {
    DEFAULT_NEXT_REWARD
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            points: DEFAULT_POINTS,
            next_reward: DEFAULT_NEXT_REWARD,
        }
    }
}

/// Generate a default brewspot.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# BrewSpot storefront configuration

[storage]
# Defaults to ~/.local/share/brewspot
# dir = ".brewspot"

[checkout]
settlement_latency_ms = {latency}
settlement_timeout_ms = {timeout}

[catalog]
# Menu JSON file; the built-in menu is used when unset
# path = "menu.json"

[rewards]
points = {points}
next_reward = {next}
"#,
        latency = default_latency_ms(),
        timeout = default_timeout_ms(),
        points = DEFAULT_POINTS,
        next = DEFAULT_NEXT_REWARD,
    )
}
