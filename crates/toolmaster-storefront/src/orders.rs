//! Append-only order history kept next to the cart.

use toolmaster_cart::Order;
use toolmaster_store::{JsonStore, KvStore, StoreError, ORDERS_KEY};
use tracing::warn;

/// The list of confirmed orders stored under a single key.
#[derive(Debug, Clone)]
pub struct OrderHistory<S> {
    store: JsonStore<S>,
    key: String,
}

impl<S: KvStore> OrderHistory<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, ORDERS_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store: JsonStore::new(store),
            key: key.into(),
        }
    }

    /// All recorded orders, oldest first.
    ///
    /// A malformed history reads as empty; storage failures are returned.
    pub fn load(&self) -> Result<Vec<Order>, StoreError> {
        match self.store.get::<Vec<Order>>(&self.key) {
            Ok(orders) => Ok(orders.unwrap_or_default()),
            Err(e @ StoreError::Malformed { .. }) => {
                warn!(key = %self.key, error = %e, "order history is malformed, starting over");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Append an order. Existing entries are never modified.
    pub fn append(&self, order: Order) -> Result<usize, StoreError> {
        let mut orders = self.load()?;
        orders.push(order);
        self.store.set(&self.key, &orders)?;
        Ok(orders.len())
    }
}
