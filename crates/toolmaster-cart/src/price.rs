//! Unit prices and money amounts.
//!
//! Amounts are kept as integer hundredths of a currency unit, so totals never
//! pick up floating-point error while stored blobs keep their plain numeric
//! form.

use std::fmt;
use std::iter::Sum;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Hundredths per currency unit.
const SCALE: i64 = 100;

/// An amount of money in one (implicit) currency.
///
/// Serializes as a JSON number in whole units: `1500` when the amount is
/// whole, `1499.5` otherwise. Deserializes from either form.
///
/// ```
/// use toolmaster_cart::Price;
///
/// let price = Price::from_decimal(1499.5);
/// assert_eq!(price.hundredths(), 149_950);
/// assert_eq!(price.times(2), 2999);
/// assert_eq!(price.to_string(), "1499.5");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(i64);

impl Price {
    pub const ZERO: Price = Price(0);

    /// A whole number of currency units.
    pub const fn units(units: i64) -> Self {
        Self(units.saturating_mul(SCALE))
    }

    pub const fn from_hundredths(hundredths: i64) -> Self {
        Self(hundredths)
    }

    /// Create a price from a decimal amount, rounded to the nearest hundredth.
    pub fn from_decimal(amount: f64) -> Self {
        Self((amount * SCALE as f64).round() as i64)
    }

    pub const fn hundredths(self) -> i64 {
        self.0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(self) -> f64 {
        self.0 as f64 / SCALE as f64
    }

    /// Whether the amount has no fractional part.
    pub fn is_whole(self) -> bool {
        self.0 % SCALE == 0
    }

    pub fn saturating_add(self, other: Price) -> Price {
        Self(self.0.saturating_add(other.0))
    }

    /// The amount for `count` units at this price.
    pub fn times(self, count: i64) -> Price {
        Self(self.0.saturating_mul(count))
    }
}

impl From<i64> for Price {
    fn from(units: i64) -> Self {
        Price::units(units)
    }
}

impl From<i32> for Price {
    fn from(units: i32) -> Self {
        Price::units(i64::from(units))
    }
}

impl PartialEq<i64> for Price {
    fn eq(&self, units: &i64) -> bool {
        *self == Price::units(*units)
    }
}

impl PartialEq<Price> for i64 {
    fn eq(&self, price: &Price) -> bool {
        price == self
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Self {
        iter.fold(Price::ZERO, Price::saturating_add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = SCALE as u64;
        let (units, frac) = (abs / scale, abs % scale);
        match frac {
            0 => write!(f, "{sign}{units}"),
            f10 if f10 % 10 == 0 => write!(f, "{sign}{units}.{}", f10 / 10),
            _ => write!(f, "{sign}{units}.{frac:02}"),
        }
    }
}

/// Error parsing a price from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid price: {input:?}")]
pub struct ParsePriceError {
    input: String,
}

impl FromStr for Price {
    type Err = ParsePriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(units) = trimmed.parse::<i64>() {
            return Ok(Price::units(units));
        }
        match trimmed.parse::<f64>() {
            Ok(amount) if amount.is_finite() => Ok(Price::from_decimal(amount)),
            _ => Err(ParsePriceError {
                input: s.to_string(),
            }),
        }
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_whole() {
            serializer.serialize_i64(self.0 / SCALE)
        } else {
            serializer.serialize_f64(self.to_decimal())
        }
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PriceVisitor)
    }
}

struct PriceVisitor;

impl Visitor<'_> for PriceVisitor {
    type Value = Price;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a numeric price")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Price, E> {
        Ok(Price::units(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Price, E> {
        Ok(Price::units(i64::try_from(v).unwrap_or(i64::MAX)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Price, E> {
        if v.is_finite() {
            Ok(Price::from_decimal(v))
        } else {
            Err(E::custom("price is not a finite number"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_prices_keep_integer_form() {
        let price = Price::units(1500);
        assert_eq!(serde_json::to_string(&price).unwrap(), "1500");
        assert_eq!(price.to_string(), "1500");
        assert_eq!(price, 1500);
    }

    #[test]
    fn test_fractional_price_reads_and_writes_back() {
        let price: Price = serde_json::from_str("1499.5").unwrap();
        assert_eq!(price.hundredths(), 149_950);
        assert_eq!(serde_json::to_string(&price).unwrap(), "1499.5");
        assert_eq!(price.to_string(), "1499.5");
        assert_eq!(Price::from_hundredths(1999).to_string(), "19.99");
    }

    #[test]
    fn test_negative_amounts_display_with_sign() {
        assert_eq!(Price::units(-20).to_string(), "-20");
        assert_eq!(Price::from_hundredths(-5).to_string(), "-0.05");
    }

    #[test]
    fn test_rejects_non_numeric_json() {
        assert!(serde_json::from_str::<Price>(r#""1500""#).is_err());
        assert!(serde_json::from_str::<Price>("null").is_err());
    }

    #[test]
    fn test_parse_from_text() {
        assert_eq!("1500".parse::<Price>().unwrap(), 1500);
        assert_eq!(" 12.25 ".parse::<Price>().unwrap().hundredths(), 1225);
        assert!("abc".parse::<Price>().is_err());
        assert!("inf".parse::<Price>().is_err());
    }

    #[test]
    fn test_arithmetic_saturates() {
        assert_eq!(Price::units(i64::MAX).hundredths(), i64::MAX);
        assert_eq!(Price::units(1500).times(3), 4500);
        let total: Price = [Price::from_hundredths(i64::MAX), Price::units(1)].into_iter().sum();
        assert_eq!(total.hundredths(), i64::MAX);
    }
}
