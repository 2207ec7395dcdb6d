//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use toolmaster_cart::CartEngine;
use toolmaster_store::{FileStore, KvStore};
use toolmaster_storefront::{Header, NotificationCenter, OrderHistory, ShopSettings, Storefront};

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names searched from the working directory upwards.
const CONFIG_NAMES: [&str; 3] = ["toolmaster.toml", ".toolmaster.toml", "toolmaster.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context, reading `config_path` if given or the nearest config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            Self::find_config(&cwd).unwrap_or_default()
        };

        Ok(Self { config, output, cwd })
    }

    fn find_config(start: &Path) -> Option<CliConfig> {
        start.ancestors().find_map(|dir| {
            CONFIG_NAMES
                .iter()
                .map(|name| dir.join(name))
                .filter(|path| path.exists())
                .find_map(|path| CliConfig::load(path).ok())
        })
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let path = PathBuf::from(path);
        if path.is_absolute() {
            path
        } else {
            self.cwd.join(path)
        }
    }

    /// Open the state file.
    pub fn open_store(&self) -> FileStore {
        let path = self.resolve_path(&self.config.store.path);
        self.output.debug(&format!("Using store {}", path.display()));
        FileStore::open(path)
    }

    /// A storefront session over `store`, initialized.
    pub fn storefront<S: KvStore>(&self, store: S) -> Storefront<S> {
        let engine = CartEngine::with_key(store, self.config.store.cart_key.clone());
        let mut page = Storefront::from_engine(
            engine,
            Header::with_cart_link("cart.html"),
            self.shop_settings(),
            NotificationCenter::new(),
        );
        page.init();
        page
    }

    /// The order history kept in `store`.
    pub fn order_history<S: KvStore>(&self, store: S) -> OrderHistory<S> {
        OrderHistory::with_key(store, self.config.store.orders_key.clone())
    }

    pub fn shop_settings(&self) -> ShopSettings {
        ShopSettings {
            currency_symbol: self.config.shop.currency_symbol.clone(),
        }
    }
}
