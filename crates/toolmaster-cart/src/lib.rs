//! Cart state engine for the ToolMaster storefront.
//!
//! This crate is the one piece of the storefront with real state:
//!
//! - **Cart**: product id to line item mapping with derived totals
//! - **Price**: money amounts in hundredths of a unit
//! - **Engine**: load, mutate and persist the cart, one operation at a time
//! - **Counter**: keep the header badge equal to the stored item count
//! - **Order**: immutable record of a confirmed checkout
//!
//! # Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use toolmaster_cart::prelude::*;
//! use toolmaster_store::MemoryStore;
//!
//! #[derive(Default)]
//! struct Header {
//!     badge: Option<i64>,
//! }
//!
//! impl BadgeHost for Header {
//!     fn has_cart_anchor(&self) -> bool { true }
//!     fn remove_badge(&mut self) { self.badge = None; }
//!     fn insert_badge(&mut self, count: i64) { self.badge = Some(count); }
//! }
//!
//! let header = Rc::new(RefCell::new(Header::default()));
//! let mut engine = CartEngine::new(MemoryStore::new())
//!     .with_listener(CounterSync::new(Rc::clone(&header)));
//!
//! engine.add_to_cart("P1", "Drill", 1500);
//! assert_eq!(header.borrow().badge, Some(1));
//!
//! engine.change_count("P1", -1);
//! assert_eq!(header.borrow().badge, None);
//! ```

pub mod cart;
pub mod counter;
pub mod engine;
pub mod event;
pub mod ids;
pub mod order;
pub mod price;

pub use cart::{Cart, CartTotals, LineItem};
pub use counter::{BadgeHost, CounterSync};
pub use engine::{CartEngine, StoreStatus};
pub use event::{CartChange, CartEvent, CartListener};
pub use ids::{OrderNumber, ProductId};
pub use order::{Customer, Order};
pub use price::{ParsePriceError, Price};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{Cart, CartTotals, LineItem};
    pub use crate::counter::{BadgeHost, CounterSync};
    pub use crate::engine::{CartEngine, StoreStatus};
    pub use crate::event::{CartChange, CartEvent, CartListener};
    pub use crate::ids::{OrderNumber, ProductId};
    pub use crate::order::{Customer, Order};
    pub use crate::price::Price;
}
