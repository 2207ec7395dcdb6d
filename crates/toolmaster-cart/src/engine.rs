//! The cart engine: read-modify-write over the store, one operation at a time.

use std::fmt;

use toolmaster_store::{KvStore, StoreError, CART_KEY};
use tracing::{debug, warn};

use crate::cart::{Cart, CartTotals};
use crate::event::{CartChange, CartEvent, CartListener};
use crate::ids::ProductId;
use crate::price::Price;

/// Health of the store as seen by the last operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StoreStatus {
    /// The last load and save went through.
    #[default]
    Healthy,
    /// The store failed; the cart was treated as empty and nothing was written.
    Degraded { reason: String },
}

impl StoreStatus {
    pub fn is_degraded(&self) -> bool {
        matches!(self, StoreStatus::Degraded { .. })
    }
}

impl fmt::Display for StoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreStatus::Healthy => f.write_str("healthy"),
            StoreStatus::Degraded { reason } => write!(f, "degraded: {}", reason),
        }
    }
}

/// Result of reading the stored cart.
enum Loaded {
    /// The cart as stored (possibly empty or reset after malformed data).
    Cart(Cart),
    /// Storage itself failed; nothing may be written on top of it.
    Unavailable,
}

/// Owns the cart lifecycle for one session.
///
/// Every operation loads the current cart from the store, applies exactly
/// one mutation, persists the result and then notifies listeners (badge
/// counter, notifications). There is no cached copy: two engines over the
/// same store see each other's writes, last write wins.
///
/// # Example
///
/// ```rust
/// use toolmaster_cart::CartEngine;
/// use toolmaster_store::MemoryStore;
///
/// let mut engine = CartEngine::new(MemoryStore::new());
/// engine.add_to_cart("P1", "Drill", 1500);
/// engine.add_to_cart("P1", "Drill", 1500);
/// assert_eq!(engine.total_items(), 2);
/// assert_eq!(engine.total_sum(), 3000);
/// ```
pub struct CartEngine<S> {
    store: S,
    key: String,
    listeners: Vec<Box<dyn CartListener>>,
    status: StoreStatus,
}

impl<S: KvStore> CartEngine<S> {
    /// Create an engine over `store` using the default cart key.
    pub fn new(store: S) -> Self {
        Self::with_key(store, CART_KEY)
    }

    /// Create an engine that keeps the cart under a custom key.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            listeners: Vec::new(),
            status: StoreStatus::Healthy,
        }
    }

    /// Register a listener notified after every operation.
    pub fn add_listener(&mut self, listener: impl CartListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Builder form of [`CartEngine::add_listener`].
    pub fn with_listener(mut self, listener: impl CartListener + 'static) -> Self {
        self.add_listener(listener);
        self
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Key the cart is stored under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Store health after the last operation.
    pub fn store_status(&self) -> &StoreStatus {
        &self.status
    }

    /// Read the current cart. Absent or malformed data reads as empty.
    pub fn load_cart(&mut self) -> Cart {
        match self.read() {
            Loaded::Cart(cart) => cart,
            Loaded::Unavailable => Cart::new(),
        }
    }

    /// Overwrite the stored cart.
    pub fn save_cart(&mut self, cart: &Cart) -> Result<(), StoreError> {
        let result = self.write(cart);
        self.record(&result);
        result
    }

    /// Add one unit of a product, inserting it with count 1 if new.
    pub fn add_to_cart(
        &mut self,
        id: impl Into<ProductId>,
        name: &str,
        price: impl Into<Price>,
    ) -> Cart {
        self.add_to_cart_with_image(id, name, price, None)
    }

    /// [`CartEngine::add_to_cart`] with an optional product image.
    pub fn add_to_cart_with_image(
        &mut self,
        id: impl Into<ProductId>,
        name: &str,
        price: impl Into<Price>,
        image: Option<String>,
    ) -> Cart {
        let id = id.into();
        let price = price.into();
        let event = CartEvent::ItemAdded {
            id: id.clone(),
            name: name.to_string(),
        };
        self.mutate(event, |cart| cart.add(id, name, price, image))
    }

    /// Remove a product. Absent products are ignored.
    pub fn remove_from_cart(&mut self, id: impl Into<ProductId>) -> Cart {
        let id = id.into();
        let event = CartEvent::ItemRemoved { id: id.clone() };
        self.mutate(event, |cart| {
            cart.remove(id.as_str());
        })
    }

    /// Adjust a product's count by `delta`, removing it at zero or below.
    /// Absent products are ignored.
    pub fn change_count(&mut self, id: impl Into<ProductId>, delta: i64) -> Cart {
        let id = id.into();
        let event = CartEvent::CountChanged {
            id: id.clone(),
            delta,
        };
        self.mutate(event, |cart| {
            cart.change_count(id.as_str(), delta);
        })
    }

    /// Remove the stored cart entirely.
    ///
    /// On failure the stored cart is left as it was, the status is degraded
    /// and listeners see the totals of the cart that is still there.
    pub fn clear_cart(&mut self) -> Result<(), StoreError> {
        let result = self.store.remove(&self.key);
        self.record(&result);

        match &result {
            Ok(()) => {
                debug!(key = %self.key, "cart cleared");
                self.notify(CartEvent::Cleared, CartTotals::default(), true);
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to clear cart");
                // Status must keep the remove failure
                let totals = self
                    .fetch()
                    .map(|cart| cart.unwrap_or_default().totals())
                    .unwrap_or_default();
                self.notify(CartEvent::Cleared, totals, false);
            }
        }
        result
    }

    /// Σ(price × count) over the stored cart.
    pub fn total_sum(&mut self) -> Price {
        self.load_cart().total_sum()
    }

    /// Σ(count) over the stored cart.
    pub fn total_items(&mut self) -> i64 {
        self.load_cart().total_items()
    }

    /// Both totals over the stored cart.
    pub fn totals(&mut self) -> CartTotals {
        self.load_cart().totals()
    }

    /// Push the current totals to every listener without changing anything.
    ///
    /// Pages call this once during initialization so the badge reflects
    /// whatever another page last wrote.
    pub fn sync_listeners(&mut self) -> CartTotals {
        let totals = self.totals();
        self.notify(CartEvent::Synced, totals, true);
        totals
    }

    fn mutate<F>(&mut self, event: CartEvent, apply: F) -> Cart
    where
        F: FnOnce(&mut Cart),
    {
        let before = match self.read() {
            Loaded::Cart(cart) => cart,
            Loaded::Unavailable => {
                // Do not write over a cart we could not read
                let empty = Cart::new();
                self.notify(event, empty.totals(), false);
                return empty;
            }
        };

        let mut after = before.clone();
        apply(&mut after);

        let result = self.write(&after);
        self.record(&result);

        match result {
            Ok(()) => {
                debug!(?event, totals = ?after.totals(), "cart updated");
                self.notify(event, after.totals(), true);
                after
            }
            Err(e) => {
                warn!(?event, error = %e, "cart update not persisted");
                self.notify(event, before.totals(), false);
                before
            }
        }
    }

    fn read(&mut self) -> Loaded {
        match self.fetch() {
            Ok(cart) => {
                self.status = StoreStatus::Healthy;
                Loaded::Cart(cart.unwrap_or_default())
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "cart storage unavailable, treating cart as empty");
                self.status = StoreStatus::Degraded {
                    reason: e.to_string(),
                };
                Loaded::Unavailable
            }
        }
    }

    /// Load and parse the stored cart without touching the status.
    ///
    /// `Ok(None)` when nothing is stored. Malformed data reads as empty.
    fn fetch(&self) -> Result<Option<Cart>, StoreError> {
        let Some(raw) = self.store.load(&self.key)? else {
            return Ok(None);
        };

        match Cart::from_json(&raw) {
            Ok(cart) => Ok(Some(cart)),
            Err(e) => {
                warn!(key = %self.key, error = %e, "stored cart is malformed, starting empty");
                Ok(Some(Cart::new()))
            }
        }
    }

    fn write(&self, cart: &Cart) -> Result<(), StoreError> {
        let raw = cart.to_json()?;
        self.store.save(&self.key, &raw)
    }

    fn record(&mut self, result: &Result<(), StoreError>) {
        self.status = match result {
            Ok(()) => StoreStatus::Healthy,
            Err(e) => StoreStatus::Degraded {
                reason: e.to_string(),
            },
        };
    }

    fn notify(&mut self, event: CartEvent, totals: CartTotals, persisted: bool) {
        let change = CartChange {
            event,
            totals,
            persisted,
        };
        for listener in &mut self.listeners {
            listener.on_cart_change(&change);
        }
    }
}

impl<S> fmt::Debug for CartEngine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartEngine")
            .field("key", &self.key)
            .field("listeners", &self.listeners.len())
            .field("status", &self.status)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use toolmaster_store::MemoryStore;

    #[derive(Default)]
    struct Recorder {
        changes: Vec<CartChange>,
    }

    impl CartListener for Recorder {
        fn on_cart_change(&mut self, change: &CartChange) {
            self.changes.push(change.clone());
        }
    }

    fn engine_with_recorder() -> (CartEngine<Rc<MemoryStore>>, Rc<MemoryStore>, Rc<RefCell<Recorder>>) {
        let store = Rc::new(MemoryStore::new());
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let engine = CartEngine::new(Rc::clone(&store)).with_listener(Rc::clone(&recorder));
        (engine, store, recorder)
    }

    #[test]
    fn test_empty_store_loads_empty_cart() {
        let mut engine = CartEngine::new(MemoryStore::new());
        assert!(engine.load_cart().is_empty());
        assert_eq!(engine.total_sum(), 0);
        assert_eq!(engine.total_items(), 0);
    }

    #[test]
    fn test_add_persists_under_cart_key() {
        let (mut engine, store, _) = engine_with_recorder();
        engine.add_to_cart("P1", "Drill", 1500);

        let raw = store.load(CART_KEY).unwrap().unwrap();
        assert_eq!(raw, r#"{"P1":{"id":"P1","name":"Drill","price":1500,"count":1}}"#);
    }

    #[test]
    fn test_malformed_blob_degrades_to_empty() {
        let store = MemoryStore::new();
        store.save(CART_KEY, "{not json").unwrap();
        let mut engine = CartEngine::new(&store);

        assert!(engine.load_cart().is_empty());
        assert!(!engine.store_status().is_degraded());

        // The next mutation starts over from empty
        let cart = engine.add_to_cart("P1", "Drill", 1500);
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_listeners_see_every_mutation() {
        let (mut engine, _, recorder) = engine_with_recorder();
        engine.add_to_cart("P1", "Drill", 1500);
        engine.change_count("P1", 2);
        engine.remove_from_cart("P1");
        engine.clear_cart().unwrap();

        let changes = &recorder.borrow().changes;
        let items: Vec<i64> = changes.iter().map(|c| c.totals.items).collect();
        assert_eq!(items, vec![1, 3, 0, 0]);
        assert!(changes.iter().all(|c| c.persisted));
        assert_eq!(
            changes[0].event,
            CartEvent::ItemAdded {
                id: ProductId::new("P1"),
                name: "Drill".to_string()
            }
        );
        assert_eq!(changes[3].event, CartEvent::Cleared);
    }

    #[test]
    fn test_sync_listeners_reports_stored_totals() {
        let (mut engine, store, recorder) = engine_with_recorder();
        store
            .save(
                CART_KEY,
                r#"{"P1":{"id":"P1","name":"Drill","price":1500,"count":4}}"#,
            )
            .unwrap();

        let totals = engine.sync_listeners();
        assert_eq!(totals.items, 4);
        assert_eq!(recorder.borrow().changes[0].event, CartEvent::Synced);
    }

    #[test]
    fn test_unavailable_store_is_reported_and_nothing_written() {
        let (mut engine, store, recorder) = engine_with_recorder();
        engine.add_to_cart("P1", "Drill", 1500);
        store.set_available(false);

        let cart = engine.add_to_cart("P2", "Saw", 900);
        assert!(cart.is_empty());
        assert!(engine.store_status().is_degraded());
        assert!(!recorder.borrow().changes.last().unwrap().persisted);

        store.set_available(true);
        let cart = engine.load_cart();
        assert_eq!(cart.len(), 1);
        assert!(cart.contains("P1"));
        assert!(!engine.store_status().is_degraded());
    }

    #[test]
    fn test_failed_save_returns_previous_cart() {
        let store = MemoryStore::new().with_quota(80);
        let mut engine = CartEngine::new(&store);

        let first = engine.add_to_cart("P1", "Drill", 1500);
        let second = engine.add_to_cart("P2", "A product with a very long display name", 900);

        assert_eq!(second, first);
        assert!(matches!(engine.store_status(), StoreStatus::Degraded { .. }));
        assert_eq!(engine.load_cart(), first);
    }

    #[test]
    fn test_failed_clear_keeps_cart() {
        let (mut engine, store, recorder) = engine_with_recorder();
        engine.add_to_cart("P1", "Drill", 1500);
        store.set_available(false);

        assert!(engine.clear_cart().is_err());
        assert!(!recorder.borrow().changes.last().unwrap().persisted);

        store.set_available(true);
        assert_eq!(engine.total_items(), 1);
    }

    #[test]
    fn test_rejected_clear_stays_degraded_while_reads_work() {
        let (mut engine, store, recorder) = engine_with_recorder();
        engine.add_to_cart("P1", "Drill", 1500);
        store.set_read_only(true);

        let err = engine.clear_cart().unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
        assert!(engine.store_status().is_degraded());

        let last = recorder.borrow().changes.last().unwrap().clone();
        assert_eq!(last.event, CartEvent::Cleared);
        assert!(!last.persisted);
        assert_eq!(last.totals.items, 1);

        assert!(store.load(CART_KEY).unwrap().unwrap().contains("\"P1\""));
    }

    #[test]
    fn test_fractional_price_survives_next_write() {
        let store = MemoryStore::new();
        store
            .save(
                CART_KEY,
                r#"{"P1":{"id":"P1","name":"Drill","price":1499.5,"count":2}}"#,
            )
            .unwrap();
        let mut engine = CartEngine::new(&store);

        assert_eq!(engine.total_items(), 2);
        let cart = engine.add_to_cart("P2", "Saw", 900);
        assert_eq!(cart.len(), 2);
        assert_eq!(engine.total_sum(), 3899);

        let raw = store.load(CART_KEY).unwrap().unwrap();
        assert!(raw.contains(r#""price":1499.5"#));
    }

    #[test]
    fn test_engines_share_the_store() {
        let store = Rc::new(MemoryStore::new());
        let mut catalog_page = CartEngine::new(Rc::clone(&store));
        let mut cart_page = CartEngine::new(Rc::clone(&store));

        catalog_page.add_to_cart("P1", "Drill", 1500);
        assert_eq!(cart_page.total_items(), 1);

        cart_page.change_count("P1", 1);
        assert_eq!(catalog_page.total_sum(), 3000);
    }
}
