//! Derived cart totals.

use serde::{Deserialize, Serialize};

use crate::price::Price;

/// Totals derived from a cart. Always recomputed, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    /// Σ(price × count).
    pub sum: Price,
    /// Σ(count), the number shown on the badge.
    pub items: i64,
    /// Number of distinct products.
    pub lines: usize,
}

impl CartTotals {
    /// Whether there is anything to show or check out.
    pub fn is_empty(&self) -> bool {
        self.items == 0
    }
}
