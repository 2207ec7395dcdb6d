//! One storefront page session: the cart engine wired to the header badge
//! and the notifications, plus the click handlers pages bind.

use std::cell::{Ref, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Instant;

use toolmaster_cart::{Cart, CartEngine, CartTotals, CounterSync};
use toolmaster_store::KvStore;
use tracing::{debug, info};

use crate::actions::{ActionError, CartAction, DataAttributes, ATTR_INITIALIZED};
use crate::cart_table::{render_cart_table, CartTable};
use crate::checkout::Checkout;
use crate::header::Header;
use crate::notify::{ButtonFeedback, NotificationCenter};
use crate::orders::OrderHistory;

/// Shop-wide display settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopSettings {
    pub currency_symbol: String,
}

impl Default for ShopSettings {
    fn default() -> Self {
        Self {
            currency_symbol: "₽".to_string(),
        }
    }
}

/// An add-to-cart button on a product card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductButton {
    attrs: BTreeMap<String, String>,
    handlers: usize,
    feedback: ButtonFeedback,
}

impl ProductButton {
    pub fn new(attrs: BTreeMap<String, String>, label: impl Into<String>) -> Self {
        Self {
            attrs,
            handlers: 0,
            feedback: ButtonFeedback::new(label),
        }
    }

    /// Whether a click handler was already bound to this button.
    pub fn is_initialized(&self) -> bool {
        self.attrs.contains_key(ATTR_INITIALIZED)
    }

    /// Number of click handlers bound.
    pub fn handlers(&self) -> usize {
        self.handlers
    }

    pub fn feedback(&self) -> &ButtonFeedback {
        &self.feedback
    }
}

impl DataAttributes for ProductButton {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.attr(name)
    }
}

/// The storefront as seen by one page.
///
/// Construct one per page and call [`Storefront::init`] once the page is
/// ready. Cart state lives only in the store; the header badge and
/// notifications are kept current through engine listeners.
pub struct Storefront<S> {
    engine: CartEngine<S>,
    header: Rc<RefCell<Header>>,
    notifications: Rc<RefCell<NotificationCenter>>,
    settings: ShopSettings,
    initialized: bool,
}

impl<S: KvStore> Storefront<S> {
    pub fn new(store: S, header: Header, settings: ShopSettings) -> Self {
        Self::with_notifications(store, header, settings, NotificationCenter::new())
    }

    /// Build a page with a preconfigured notification center.
    pub fn with_notifications(
        store: S,
        header: Header,
        settings: ShopSettings,
        notifications: NotificationCenter,
    ) -> Self {
        Self::from_engine(CartEngine::new(store), header, settings, notifications)
    }

    /// Build a page around an existing engine (e.g. one using a custom key).
    pub fn from_engine(
        mut engine: CartEngine<S>,
        header: Header,
        settings: ShopSettings,
        notifications: NotificationCenter,
    ) -> Self {
        let header = Rc::new(RefCell::new(header));
        let notifications = Rc::new(RefCell::new(notifications));
        engine.add_listener(CounterSync::new(Rc::clone(&header)));
        engine.add_listener(Rc::clone(&notifications));

        Self {
            engine,
            header,
            notifications,
            settings,
            initialized: false,
        }
    }

    /// Bring the header badge in line with the stored cart.
    ///
    /// Only the first call does anything; returns whether it did.
    pub fn init(&mut self) -> bool {
        if self.initialized {
            debug!("storefront already initialized");
            return false;
        }
        let totals = self.engine.sync_listeners();
        self.initialized = true;
        info!(items = totals.items, status = %self.engine.store_status(), "storefront initialized");
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Attach click handlers to add-to-cart buttons.
    ///
    /// Buttons already carrying the initialized marker are skipped, so the
    /// page can call this again after inserting new product cards. Returns
    /// the number of buttons newly bound.
    pub fn bind_add_buttons(&self, buttons: &mut [ProductButton]) -> usize {
        let mut bound = 0;
        for button in buttons.iter_mut().filter(|b| !b.is_initialized()) {
            button
                .attrs
                .insert(ATTR_INITIALIZED.to_string(), "true".to_string());
            button.handlers += 1;
            bound += 1;
        }
        debug!(found = buttons.len(), bound, "add-to-cart buttons bound");
        bound
    }

    /// A click on an add-to-cart button at `now`.
    ///
    /// Every bound handler runs. Returns `Ok(None)` when nothing ran: the
    /// button has no handler or is still disabled from the previous click.
    pub fn click_add(
        &mut self,
        button: &mut ProductButton,
        now: Instant,
    ) -> Result<Option<Cart>, ActionError> {
        if button.handlers == 0 || button.feedback.disabled(now) {
            return Ok(None);
        }

        let mut cart = None;
        for _ in 0..button.handlers {
            let action = CartAction::add_from(&*button)?;
            cart = Some(self.dispatch(action));
        }
        button.feedback.press(now);
        Ok(cart)
    }

    /// A click on a `+`/`-` button in the cart table. Returns the re-rendered table.
    pub fn click_change(&mut self, attrs: &impl DataAttributes) -> Result<CartTable, ActionError> {
        let action = CartAction::change_from(attrs)?;
        self.dispatch(action);
        Ok(self.render_cart())
    }

    /// A click on a remove button in the cart table. Returns the re-rendered table.
    pub fn click_remove(&mut self, attrs: &impl DataAttributes) -> Result<CartTable, ActionError> {
        let action = CartAction::remove_from(attrs)?;
        self.dispatch(action);
        Ok(self.render_cart())
    }

    /// Route an action to the engine.
    pub fn dispatch(&mut self, action: CartAction) -> Cart {
        match action {
            CartAction::Add { id, name, price } => self.engine.add_to_cart(id, &name, price),
            CartAction::ChangeCount { id, delta } => self.engine.change_count(id, delta),
            CartAction::Remove { id } => self.engine.remove_from_cart(id),
        }
    }

    /// Render the cart page table from the stored cart.
    pub fn render_cart(&mut self) -> CartTable {
        let cart = self.engine.load_cart();
        render_cart_table(&cart, &self.settings.currency_symbol)
    }

    pub fn render_header(&self) -> String {
        self.header.borrow().render()
    }

    /// Retire expired toasts and render the rest.
    pub fn render_notifications(&self, now: Instant) -> String {
        let mut notifications = self.notifications.borrow_mut();
        notifications.tick(now);
        notifications.render(now)
    }

    /// Start a checkout recording orders into `history`.
    pub fn checkout<'a, H: KvStore>(&'a mut self, history: &'a OrderHistory<H>) -> Checkout<'a, S, H> {
        Checkout::new(&mut self.engine, history, &self.settings.currency_symbol)
    }

    pub fn totals(&mut self) -> CartTotals {
        self.engine.totals()
    }

    pub fn engine(&mut self) -> &mut CartEngine<S> {
        &mut self.engine
    }

    pub fn header(&self) -> Ref<'_, Header> {
        self.header.borrow()
    }

    pub fn notifications(&self) -> Ref<'_, NotificationCenter> {
        self.notifications.borrow()
    }

    pub fn settings(&self) -> &ShopSettings {
        &self.settings
    }
}

impl<S> std::fmt::Debug for Storefront<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("engine", &self.engine)
            .field("header", &self.header)
            .field("settings", &self.settings)
            .field("initialized", &self.initialized)
            .finish_non_exhaustive()
    }
}
