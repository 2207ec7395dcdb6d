//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use toolmaster_store::{CART_KEY, ORDERS_KEY};

/// Contents of `toolmaster.toml` (or `toolmaster.json`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where and under which keys the storefront state is kept.
    #[serde(default)]
    pub store: StoreConfig,

    /// Shop display and contact settings.
    #[serde(default)]
    pub shop: ShopConfig,
}

impl CliConfig {
    /// Load config from a file. `.json` files are read as JSON, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }
}

/// Storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// State file, relative to the working directory unless absolute.
    #[serde(default = "default_store_path")]
    pub path: String,

    #[serde(default = "default_cart_key")]
    pub cart_key: String,

    #[serde(default = "default_orders_key")]
    pub orders_key: String,
}

fn default_store_path() -> String {
    "toolmaster-data.json".to_string()
}

fn default_cart_key() -> String {
    CART_KEY.to_string()
}

fn default_orders_key() -> String {
    ORDERS_KEY.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            cart_key: default_cart_key(),
            orders_key: default_orders_key(),
        }
    }
}

/// Shop settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopConfig {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Form endpoint the contact command posts to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_endpoint: Option<String>,
}

fn default_currency_symbol() -> String {
    "₽".to_string()
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            contact_endpoint: None,
        }
    }
}
