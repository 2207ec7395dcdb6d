//! Order records kept in the append-only history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::ids::OrderNumber;
use crate::price::Price;

/// Contact details entered in the order form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
}

/// A completed checkout. Built once from a cart snapshot and never changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// When the order was confirmed.
    pub date: DateTime<Utc>,
    pub customer: Customer,
    /// The cart exactly as it was at confirmation.
    pub items: Cart,
    /// Σ(price × count) of `items` at confirmation.
    pub total: Price,
}

impl Order {
    /// Snapshot `cart` into a new order placed at `date`.
    pub fn new(customer: Customer, cart: &Cart, date: DateTime<Utc>) -> Self {
        Self {
            date,
            customer,
            items: cart.clone(),
            total: cart.total_sum(),
        }
    }

    /// Confirmation number shown to the customer, derived from the
    /// confirmation time in milliseconds.
    pub fn number(&self) -> OrderNumber {
        OrderNumber::new(format!("#{}", self.date.timestamp_millis()))
    }

    /// Total number of units ordered.
    pub fn item_count(&self) -> i64 {
        self.items.total_items()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_order_snapshots_cart() {
        let mut cart = Cart::new();
        cart.add("P1".into(), "Drill", 1500, None);
        cart.change_count("P1", 1);

        let date = Utc.timestamp_millis_opt(1_718_000_000_123).unwrap();
        let order = Order::new(
            Customer {
                name: "Ivan".into(),
                phone: "+7 900 000 00 00".into(),
                ..Default::default()
            },
            &cart,
            date,
        );

        cart.clear();
        assert_eq!(order.total, 3000);
        assert_eq!(order.item_count(), 2);
        assert_eq!(order.number().as_str(), "#1718000000123");
    }

    #[test]
    fn test_reads_history_entry_without_optional_fields() {
        let raw = r#"{
            "date": "2024-06-10T06:13:20.123Z",
            "customer": {"name": "Ivan", "phone": "89000000000"},
            "items": {},
            "total": 0
        }"#;
        let order: Order = serde_json::from_str(raw).unwrap();
        assert_eq!(order.customer.email, "");
        assert!(order.items.is_empty());
    }
}
