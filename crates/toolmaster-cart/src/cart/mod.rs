//! Cart contents and derived totals.

#[allow(clippy::module_inception)]
mod cart;
mod totals;

pub use cart::{Cart, LineItem};
pub use totals::CartTotals;
