//! Change signals propagated after every cart operation.

use std::cell::RefCell;
use std::rc::Rc;

use crate::cart::CartTotals;
use crate::ids::ProductId;

/// What a cart operation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// Page initialization: views should re-read the current totals.
    Synced,
    /// One unit of a product was added.
    ItemAdded { id: ProductId, name: String },
    /// A product was removed (or was already absent).
    ItemRemoved { id: ProductId },
    /// A product's count was adjusted.
    CountChanged { id: ProductId, delta: i64 },
    /// The whole cart was cleared.
    Cleared,
}

/// A signal delivered to [`CartListener`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartChange {
    pub event: CartEvent,
    /// Totals of the cart as it is now persisted.
    pub totals: CartTotals,
    /// `false` when the write failed and the stored cart was left unchanged.
    pub persisted: bool,
}

/// Something that re-renders or reacts after a cart operation.
pub trait CartListener {
    fn on_cart_change(&mut self, change: &CartChange);
}

impl<L: CartListener + ?Sized> CartListener for Box<L> {
    fn on_cart_change(&mut self, change: &CartChange) {
        (**self).on_cart_change(change);
    }
}

/// Shared handle, for views the page also reads back after the engine has
/// updated them.
impl<L: CartListener + ?Sized> CartListener for Rc<RefCell<L>> {
    fn on_cart_change(&mut self, change: &CartChange) {
        self.borrow_mut().on_cart_change(change);
    }
}
