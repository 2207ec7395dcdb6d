//! Key-value storage layer for the ToolMaster storefront.
//!
//! Models the browser's per-origin string storage: one string value per key,
//! surviving page reloads, last write wins. The cart and the order history
//! each live under a single fixed key as a JSON blob.
//!
//! Unlike `localStorage`, every operation returns a `Result` so callers can
//! tell "nothing stored" apart from "storage is broken".
//!
//! # Example
//!
//! ```rust
//! use toolmaster_store::{KvStore, MemoryStore, CART_KEY};
//!
//! let store = MemoryStore::new();
//! store.save(CART_KEY, "{}").unwrap();
//! assert_eq!(store.load(CART_KEY).unwrap().as_deref(), Some("{}"));
//! store.remove(CART_KEY).unwrap();
//! assert_eq!(store.load(CART_KEY).unwrap(), None);
//! ```

mod error;
mod file;
mod json;
mod kv;

pub use error::StoreError;
pub use file::FileStore;
pub use json::JsonStore;
pub use kv::{KvStore, MemoryStore};

/// Key holding the serialized cart mapping.
pub const CART_KEY: &str = "toolmaster_cart";

/// Key holding the append-only order history.
pub const ORDERS_KEY: &str = "toolmaster_orders";

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FileStore, JsonStore, KvStore, MemoryStore, StoreError};
    pub use crate::{CART_KEY, ORDERS_KEY};
}
