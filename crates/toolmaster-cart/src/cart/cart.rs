//! Cart and line item types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::cart::CartTotals;
use crate::ids::ProductId;
use crate::price::Price;

/// A shopping cart: product id to line item, in insertion order.
///
/// Serializes as the bare mapping `{ "<id>": {id, name, price, image?, count} }`
/// so the stored blob stays compatible with what the storefront pages write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: IndexMap<ProductId, LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a stored cart blob.
    ///
    /// The result is normalized: see [`Cart::normalize`].
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let mut cart: Cart = serde_json::from_str(raw)?;
        cart.normalize();
        Ok(cart)
    }

    /// Serialize to the stored blob format.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Add one unit of a product.
    ///
    /// A product already in the cart keeps its original name, price and
    /// image; only its count grows.
    pub fn add(
        &mut self,
        id: ProductId,
        name: impl Into<String>,
        price: impl Into<Price>,
        image: Option<String>,
    ) {
        if let Some(existing) = self.items.get_mut(&id) {
            existing.count = existing.count.saturating_add(1);
            return;
        }

        let item = LineItem {
            id: id.clone(),
            name: name.into(),
            price: price.into(),
            image,
            count: 1,
        };
        self.items.insert(id, item);
    }

    /// Remove a product. Returns the removed line, if any.
    pub fn remove(&mut self, id: &str) -> Option<LineItem> {
        self.items.shift_remove(id)
    }

    /// Adjust a product's count by `delta`.
    ///
    /// A line whose count reaches zero or below is removed. Returns `false`
    /// if the product is not in the cart.
    pub fn change_count(&mut self, id: &str, delta: i64) -> bool {
        let Some(item) = self.items.get_mut(id) else {
            return false;
        };

        item.count = item.count.saturating_add(delta);
        if item.count <= 0 {
            self.items.shift_remove(id);
        }
        true
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Get a line by product id.
    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.items.get(id)
    }

    /// Whether the product is in the cart.
    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Iterate lines in display order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.values()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Σ(price × count) over all lines.
    pub fn total_sum(&self) -> Price {
        self.iter().map(LineItem::line_total).sum()
    }

    /// Σ(count) over all lines.
    pub fn total_items(&self) -> i64 {
        self.iter()
            .fold(0i64, |acc, item| acc.saturating_add(item.count))
    }

    /// Both totals at once.
    pub fn totals(&self) -> CartTotals {
        CartTotals {
            sum: self.total_sum(),
            items: self.total_items(),
            lines: self.len(),
        }
    }

    /// Restore the mapping invariants on data read from storage.
    ///
    /// Each line's `id` is set to its key, and lines with a count of zero or
    /// less are dropped. Returns the number of lines that were fixed or dropped.
    pub fn normalize(&mut self) -> usize {
        let mut touched = 0;

        for (key, item) in self.items.iter_mut() {
            if item.id != *key {
                item.id = key.clone();
                touched += 1;
            }
        }

        let before = self.items.len();
        self.items.retain(|_, item| item.count > 0);
        touched + (before - self.items.len())
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = indexmap::map::Values<'a, ProductId, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.values()
    }
}

/// A single product entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product identifier, equal to the line's key in the cart.
    pub id: ProductId,
    /// Display name, fixed when the line is created.
    pub name: String,
    /// Unit price, fixed when the line is created.
    pub price: Price,
    /// Optional product image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Quantity, always at least 1 while the line exists.
    pub count: i64,
}

impl LineItem {
    /// price × count.
    pub fn line_total(&self) -> Price {
        self.price.times(self.count)
    }
}
