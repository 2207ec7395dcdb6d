//! Click actions decoded from element data attributes.

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;
use toolmaster_cart::{Price, ProductId};
use tracing::warn;

/// Attribute on add-to-cart buttons carrying the product id.
pub const ATTR_PRODUCT_ID: &str = "data-product-id";
/// Attribute on add-to-cart buttons carrying the display name.
pub const ATTR_PRODUCT_NAME: &str = "data-product-name";
/// Attribute on add-to-cart buttons carrying the unit price.
pub const ATTR_PRODUCT_PRICE: &str = "data-product-price";
/// Target product of quantity and remove buttons in the cart table.
pub const ATTR_TARGET_ID: &str = "data-id";
/// Signed step of quantity buttons.
pub const ATTR_DELTA: &str = "data-delta";
/// Marker set on buttons whose click handler is already registered.
pub const ATTR_INITIALIZED: &str = "data-cart-initialized";

/// Read access to an element's attributes.
pub trait DataAttributes {
    fn attr(&self, name: &str) -> Option<&str>;
}

impl DataAttributes for HashMap<String, String> {
    fn attr(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl DataAttributes for BTreeMap<String, String> {
    fn attr(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// Errors decoding an action from attributes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("Missing attribute: {0}")]
    MissingAttribute(&'static str),

    #[error("Invalid quantity step: {0:?}")]
    InvalidDelta(String),
}

/// A cart operation requested by a click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    Add {
        id: ProductId,
        name: String,
        price: Price,
    },
    ChangeCount {
        id: ProductId,
        delta: i64,
    },
    Remove {
        id: ProductId,
    },
}

impl CartAction {
    /// Decode an add-to-cart button.
    ///
    /// A missing or unreadable price reads as 0 (with a warning) and a
    /// missing name as an empty string, so a badly tagged button still adds
    /// something visible rather than doing nothing.
    pub fn add_from(attrs: &impl DataAttributes) -> Result<Self, ActionError> {
        let id = attrs
            .attr(ATTR_PRODUCT_ID)
            .ok_or(ActionError::MissingAttribute(ATTR_PRODUCT_ID))?;
        let name = attrs.attr(ATTR_PRODUCT_NAME).unwrap_or_default();
        let price = match attrs.attr(ATTR_PRODUCT_PRICE) {
            Some(raw) => parse_int_prefix(raw).unwrap_or_else(|| {
                warn!(product = id, raw, "unreadable product price, adding at 0");
                0
            }),
            None => {
                warn!(product = id, "product has no price, adding at 0");
                0
            }
        };

        Ok(CartAction::Add {
            id: ProductId::new(id),
            name: name.to_string(),
            price: Price::units(price),
        })
    }

    /// Decode a `+`/`-` button in the cart table.
    pub fn change_from(attrs: &impl DataAttributes) -> Result<Self, ActionError> {
        let id = attrs
            .attr(ATTR_TARGET_ID)
            .ok_or(ActionError::MissingAttribute(ATTR_TARGET_ID))?;
        let raw = attrs
            .attr(ATTR_DELTA)
            .ok_or(ActionError::MissingAttribute(ATTR_DELTA))?;
        let delta = parse_int_prefix(raw).ok_or_else(|| ActionError::InvalidDelta(raw.to_string()))?;

        Ok(CartAction::ChangeCount {
            id: ProductId::new(id),
            delta,
        })
    }

    /// Decode a remove button in the cart table.
    pub fn remove_from(attrs: &impl DataAttributes) -> Result<Self, ActionError> {
        let id = attrs
            .attr(ATTR_TARGET_ID)
            .ok_or(ActionError::MissingAttribute(ATTR_TARGET_ID))?;
        Ok(CartAction::Remove {
            id: ProductId::new(id),
        })
    }
}

/// Parse a leading base-10 integer the way HTML attribute values are usually
/// read: leading whitespace and a sign are allowed, trailing junk is ignored
/// (`"1500 ₽"` is 1500). Returns `None` when there are no digits.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_int_prefix("1500"), Some(1500));
        assert_eq!(parse_int_prefix("  -1"), Some(-1));
        assert_eq!(parse_int_prefix("+1"), Some(1));
        assert_eq!(parse_int_prefix("1500 ₽"), Some(1500));
        assert_eq!(parse_int_prefix("12.75"), Some(12));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("-"), None);
    }

    #[test]
    fn test_add_from_attributes() {
        let action = CartAction::add_from(&attrs(&[
            (ATTR_PRODUCT_ID, "P1"),
            (ATTR_PRODUCT_NAME, "Drill"),
            (ATTR_PRODUCT_PRICE, "1500"),
        ]))
        .unwrap();

        assert_eq!(
            action,
            CartAction::Add {
                id: ProductId::new("P1"),
                name: "Drill".into(),
                price: Price::units(1500)
            }
        );
    }

    #[test]
    fn test_add_with_bad_price_defaults_to_zero() {
        let action = CartAction::add_from(&attrs(&[
            (ATTR_PRODUCT_ID, "P1"),
            (ATTR_PRODUCT_PRICE, "call us"),
        ]))
        .unwrap();
        assert!(matches!(action, CartAction::Add { price: Price::ZERO, .. }));
    }

    #[test]
    fn test_add_with_out_of_range_price_defaults_to_zero() {
        assert_eq!(parse_int_prefix("99999999999999999999"), None);
        let action = CartAction::add_from(&attrs(&[
            (ATTR_PRODUCT_ID, "P1"),
            (ATTR_PRODUCT_PRICE, "99999999999999999999"),
        ]))
        .unwrap();
        assert!(matches!(action, CartAction::Add { price: Price::ZERO, .. }));
    }

    #[test]
    fn test_add_without_id_fails() {
        let err = CartAction::add_from(&attrs(&[(ATTR_PRODUCT_NAME, "Drill")])).unwrap_err();
        assert_eq!(err, ActionError::MissingAttribute(ATTR_PRODUCT_ID));
    }

    #[test]
    fn test_change_and_remove() {
        let minus = CartAction::change_from(&attrs(&[(ATTR_TARGET_ID, "P1"), (ATTR_DELTA, "-1")]));
        assert_eq!(
            minus.unwrap(),
            CartAction::ChangeCount {
                id: ProductId::new("P1"),
                delta: -1
            }
        );

        let bad = CartAction::change_from(&attrs(&[(ATTR_TARGET_ID, "P1"), (ATTR_DELTA, "x")]));
        assert_eq!(bad.unwrap_err(), ActionError::InvalidDelta("x".into()));

        let remove = CartAction::remove_from(&attrs(&[(ATTR_TARGET_ID, "P1")])).unwrap();
        assert_eq!(remove, CartAction::Remove { id: ProductId::new("P1") });
    }
}
