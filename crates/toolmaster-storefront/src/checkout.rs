//! Order modal: form validation, order summary and confirmation.

use chrono::{DateTime, Utc};
use thiserror::Error;
use toolmaster_cart::{Cart, CartEngine, Customer, Order, OrderNumber};
use toolmaster_store::{KvStore, StoreError};
use tracing::{info, warn};

use crate::html::format_price;
use crate::orders::OrderHistory;

/// Errors that stop a checkout. The cart is left as it was.
#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("Cart is empty! Add products before placing an order.")]
    EmptyCart,

    #[error("Please fill in the required fields (name and phone)")]
    MissingRequired,

    #[error("Could not save the order: {0}")]
    History(#[from] StoreError),
}

/// Values typed into the order form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl OrderForm {
    /// Trim the input and check the required fields.
    pub fn validate(&self) -> Result<Customer, CheckoutError> {
        let name = self.name.trim();
        let phone = self.phone.trim();
        if name.is_empty() || phone.is_empty() {
            return Err(CheckoutError::MissingRequired);
        }

        Ok(Customer {
            name: name.to_string(),
            phone: phone.to_string(),
            email: self.email.trim().to_string(),
            address: self.address.trim().to_string(),
        })
    }
}

/// What the customer sees after confirming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub number: OrderNumber,
    pub order: Order,
    /// Plain-text order summary for the shop manager.
    pub summary: String,
    /// Whether the cart was emptied after the order was recorded.
    pub cart_cleared: bool,
}

impl Confirmation {
    /// The success message shown to the customer.
    pub fn message(&self) -> String {
        format!(
            "Order placed!\n\nOrder number: {}\n\nA manager will contact you to confirm the order.",
            self.number
        )
    }
}

/// Build the human-readable order summary.
pub fn order_summary(customer: &Customer, cart: &Cart, currency_symbol: &str) -> String {
    let mut text = String::from("NEW ORDER\n\n");
    text.push_str(&format!("Name: {}\n", customer.name));
    text.push_str(&format!("Phone: {}\n", customer.phone));
    if !customer.email.is_empty() {
        text.push_str(&format!("Email: {}\n", customer.email));
    }
    if !customer.address.is_empty() {
        text.push_str(&format!("Address: {}\n", customer.address));
    }

    text.push_str("\nItems:\n");
    for item in cart {
        text.push_str(&format!(
            "- {}: {} × {} = {}\n",
            item.name,
            item.count,
            format_price(item.price, currency_symbol),
            format_price(item.line_total(), currency_symbol)
        ));
    }

    text.push_str(&format!(
        "\nTotal: {}",
        format_price(cart.total_sum(), currency_symbol)
    ));
    text
}

/// Checkout flow over the shared store.
pub struct Checkout<'a, S: KvStore, H: KvStore> {
    engine: &'a mut CartEngine<S>,
    history: &'a OrderHistory<H>,
    currency_symbol: &'a str,
}

impl<'a, S: KvStore, H: KvStore> Checkout<'a, S, H> {
    pub fn new(
        engine: &'a mut CartEngine<S>,
        history: &'a OrderHistory<H>,
        currency_symbol: &'a str,
    ) -> Self {
        Self {
            engine,
            history,
            currency_symbol,
        }
    }

    /// Guard for opening the order form: the cart must not be empty.
    pub fn begin(&mut self) -> Result<Cart, CheckoutError> {
        let cart = self.engine.load_cart();
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        Ok(cart)
    }

    /// Confirm the order at `now`.
    ///
    /// Validates the form, snapshots the cart into the order history and
    /// clears the cart. If the history cannot be written the cart is kept so
    /// the customer can retry. A cart that cannot be cleared afterwards does
    /// not fail the order; it is reported through
    /// [`Confirmation::cart_cleared`].
    pub fn confirm(&mut self, form: &OrderForm, now: DateTime<Utc>) -> Result<Confirmation, CheckoutError> {
        let cart = self.begin()?;
        let customer = form.validate()?;

        let summary = order_summary(&customer, &cart, self.currency_symbol);
        let order = Order::new(customer, &cart, now);
        let number = order.number();

        self.history.append(order.clone())?;
        let cart_cleared = match self.engine.clear_cart() {
            Ok(()) => true,
            Err(e) => {
                warn!(order = %number, error = %e, "order recorded but cart could not be cleared");
                false
            }
        };

        info!(order = %number, total = %order.total, items = order.item_count(), "order confirmed");
        Ok(Confirmation {
            number,
            order,
            summary,
            cart_cleared,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::rc::Rc;
    use toolmaster_cart::Price;
    use toolmaster_store::MemoryStore;

    fn form() -> OrderForm {
        OrderForm {
            name: "  Ivan Petrov ".into(),
            phone: "+7 900 123-45-67".into(),
            email: String::new(),
            address: "Moscow".into(),
        }
    }

    #[test]
    fn test_validate_requires_name_and_phone() {
        assert!(matches!(
            OrderForm::default().validate(),
            Err(CheckoutError::MissingRequired)
        ));
        let customer = form().validate().unwrap();
        assert_eq!(customer.name, "Ivan Petrov");
    }

    #[test]
    fn test_summary_lists_lines_and_total() {
        let mut cart = Cart::new();
        cart.add("P1".into(), "Drill", 1500, None);
        cart.change_count("P1", 1);
        let customer = form().validate().unwrap();

        let summary = order_summary(&customer, &cart, "₽");
        assert!(summary.starts_with("NEW ORDER\n\nName: Ivan Petrov\n"));
        assert!(!summary.contains("Email:"));
        assert!(summary.contains("Address: Moscow\n"));
        assert!(summary.contains("- Drill: 2 × 1500 ₽ = 3000 ₽\n"));
        assert!(summary.ends_with("Total: 3000 ₽"));
    }

    #[test]
    fn test_confirm_records_order_and_clears_cart() {
        let store = Rc::new(MemoryStore::new());
        let mut engine = CartEngine::new(Rc::clone(&store));
        let history = OrderHistory::new(Rc::clone(&store));
        engine.add_to_cart("P1", "Drill", 1500);

        let now = Utc.timestamp_millis_opt(1_718_000_000_000).unwrap();
        let confirmation = Checkout::new(&mut engine, &history, "₽")
            .confirm(&form(), now)
            .unwrap();

        assert_eq!(confirmation.number.as_str(), "#1718000000000");
        assert!(confirmation.message().contains("#1718000000000"));
        assert!(confirmation.cart_cleared);
        assert!(engine.load_cart().is_empty());

        let orders = history.load().unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].total, 1500);
        assert!(orders[0].items.contains("P1"));
    }

    #[test]
    fn test_empty_cart_cannot_check_out() {
        let store = MemoryStore::new();
        let mut engine = CartEngine::new(&store);
        let history = OrderHistory::new(&store);

        let err = Checkout::new(&mut engine, &history, "₽")
            .confirm(&form(), Utc::now())
            .unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));
    }

    #[test]
    fn test_invalid_form_keeps_cart() {
        let store = MemoryStore::new();
        let mut engine = CartEngine::new(&store);
        let history = OrderHistory::new(&store);
        engine.add_to_cart("P1", "Drill", 1500);

        let err = Checkout::new(&mut engine, &history, "₽")
            .confirm(&OrderForm::default(), Utc::now())
            .unwrap_err();
        assert!(matches!(err, CheckoutError::MissingRequired));
        assert_eq!(engine.total_items(), 1);
        assert!(history.load().unwrap().is_empty());
    }

    #[test]
    fn test_history_failure_keeps_cart() {
        let cart_store = MemoryStore::new();
        let history_store = MemoryStore::new();
        history_store.set_available(false);

        let mut engine = CartEngine::new(&cart_store);
        let history = OrderHistory::new(&history_store);
        engine.add_to_cart("P1", "Drill", 1500);

        let err = Checkout::new(&mut engine, &history, "₽")
            .confirm(&form(), Utc::now())
            .unwrap_err();
        assert!(matches!(err, CheckoutError::History(_)));
        assert_eq!(engine.total_items(), 1);
    }

    #[test]
    fn test_order_kept_when_cart_cannot_be_cleared() {
        let cart_store = MemoryStore::new();
        let history_store = MemoryStore::new();
        let mut engine = CartEngine::new(&cart_store);
        let history = OrderHistory::new(&history_store);
        engine.add_to_cart("P1", "Drill", 1500);
        cart_store.set_read_only(true);

        let confirmation = Checkout::new(&mut engine, &history, "₽")
            .confirm(&form(), Utc::now())
            .unwrap();

        assert!(!confirmation.cart_cleared);
        assert!(engine.store_status().is_degraded());
        assert_eq!(history.load().unwrap().len(), 1);

        cart_store.set_read_only(false);
        assert_eq!(engine.total_items(), 1);
    }

    #[test]
    fn test_summary_shows_fractional_prices() {
        let mut cart = Cart::new();
        cart.add("P1".into(), "Bits", Price::from_hundredths(49_950), None);
        cart.change_count("P1", 2);
        let customer = form().validate().unwrap();

        let summary = order_summary(&customer, &cart, "₽");
        assert!(summary.contains("- Bits: 3 × 499.5 ₽ = 1498.5 ₽\n"));
        assert!(summary.ends_with("Total: 1498.5 ₽"));
    }
}
