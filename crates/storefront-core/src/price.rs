//! # Price Module
//!
//! Provides the `Price` type for handling monetary values safely.
//!
//! ## Why Integer Cents?
//! ```text
//! In floating point:  0.1 + 0.2 = 0.30000000000000004   WRONG
//! In integer cents:   10 + 20   = 30                    exact
//! ```
//! Every price and sale total in the system is carried as cents (i64).
//! The wire layer accepts decimal text (`"49.99"`, `"49,99"`) or a JSON
//! number and converts at the boundary.
//!
//! ## Usage
//! ```rust
//! use storefront_core::price::Price;
//!
//! let price = Price::parse("49.99").unwrap();
//! assert_eq!(price.cents(), 4999);
//! assert!(price.is_positive());
//! ```

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

// =============================================================================
// Price Type
// =============================================================================

/// A monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: negative values parse so range rules can reject
///   them explicitly instead of choking on the minus sign
/// - **Single field tuple struct**: zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(i64);

/// Why a decimal string could not become a [`Price`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParsePriceError {
    /// The input was empty or whitespace.
    #[error("value is empty")]
    Empty,

    /// The input was not digits with at most one decimal separator.
    #[error("value is not a decimal number")]
    Malformed,
}

impl Price {
    /// Creates a Price from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Price(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// True when the value is strictly greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Parses decimal text into a Price.
    ///
    /// ## Accepted Shape
    /// An optional leading `-`, then digits with at most one `.` or `,`
    /// separator followed by at least one fraction digit:
    /// `"12"`, `"12.5"`, `"12,50"`, `"-3.10"`.
    ///
    /// Fraction digits beyond the second are truncated (prices carry two
    /// decimals).
    pub fn parse(raw: &str) -> Result<Price, ParsePriceError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ParsePriceError::Empty);
        }

        let (negative, digits) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };

        let separators = digits.chars().filter(|c| *c == '.' || *c == ',').count();
        if separators > 1 {
            return Err(ParsePriceError::Malformed);
        }

        let (whole, fraction) = match digits.split_once(['.', ',']) {
            Some((whole, fraction)) => (whole, fraction),
            None => (digits, ""),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParsePriceError::Malformed);
        }
        // A bare trailing separator ("12.") is not a number.
        if separators == 1 && fraction.is_empty() {
            return Err(ParsePriceError::Malformed);
        }
        if !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParsePriceError::Malformed);
        }

        let whole: i64 = whole.parse().map_err(|_| ParsePriceError::Malformed)?;

        let mut minor: i64 = 0;
        for (i, digit) in fraction.bytes().take(2).enumerate() {
            let place = if i == 0 { 10 } else { 1 };
            minor += i64::from(digit - b'0') * place;
        }

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or(ParsePriceError::Malformed)?;

        Ok(Price(if negative { -cents } else { cents }))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

// =============================================================================
// Serde
// =============================================================================

/// Serializes as a JSON number (`4999` cents → `49.99`).
impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0 as f64 / 100.0)
    }
}

/// Deserializes from a JSON number or decimal string.
impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PriceVisitor;

        impl<'de> Visitor<'de> for PriceVisitor {
            type Value = Price;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a decimal number or string")
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Price, E> {
                Ok(Price((v * 100.0).round() as i64))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Price, E> {
                v.checked_mul(100)
                    .map(Price)
                    .ok_or_else(|| E::custom("price overflows"))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Price, E> {
                i64::try_from(v)
                    .ok()
                    .and_then(|v| v.checked_mul(100))
                    .map(Price)
                    .ok_or_else(|| E::custom("price overflows"))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Price, E> {
                Price::parse(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(PriceVisitor)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_integers() {
        assert_eq!(Price::parse("12").unwrap().cents(), 1200);
        assert_eq!(Price::parse("0").unwrap().cents(), 0);
    }

    #[test]
    fn parses_both_separators() {
        assert_eq!(Price::parse("49.99").unwrap().cents(), 4999);
        assert_eq!(Price::parse("49,99").unwrap().cents(), 4999);
        assert_eq!(Price::parse("3.5").unwrap().cents(), 350);
    }

    #[test]
    fn parses_negative_values() {
        // Negative values parse so the range rule can reject them with
        // OutOfRange instead of InvalidFormat.
        assert_eq!(Price::parse("-5").unwrap().cents(), -500);
        assert!(!Price::parse("-5").unwrap().is_positive());
    }

    #[test]
    fn truncates_extra_fraction_digits() {
        assert_eq!(Price::parse("1.999").unwrap().cents(), 199);
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(Price::parse(""), Err(ParsePriceError::Empty));
        assert_eq!(Price::parse("   "), Err(ParsePriceError::Empty));
        assert_eq!(Price::parse("abc"), Err(ParsePriceError::Malformed));
        assert_eq!(Price::parse("1.2.3"), Err(ParsePriceError::Malformed));
        assert_eq!(Price::parse("12."), Err(ParsePriceError::Malformed));
        assert_eq!(Price::parse(".5"), Err(ParsePriceError::Malformed));
        assert_eq!(Price::parse("1 000"), Err(ParsePriceError::Malformed));
    }

    #[test]
    fn displays_two_decimals() {
        assert_eq!(Price::from_cents(4999).to_string(), "49.99");
        assert_eq!(Price::from_cents(500).to_string(), "5.00");
        assert_eq!(Price::from_cents(-310).to_string(), "-3.10");
    }

    #[test]
    fn serializes_as_number() {
        let json = serde_json::to_string(&Price::from_cents(4999)).unwrap();
        assert_eq!(json, "49.99");
    }

    #[test]
    fn deserializes_number_and_string() {
        let from_number: Price = serde_json::from_str("49.99").unwrap();
        let from_string: Price = serde_json::from_str("\"49.99\"").unwrap();
        let from_int: Price = serde_json::from_str("50").unwrap();
        assert_eq!(from_number.cents(), 4999);
        assert_eq!(from_string.cents(), 4999);
        assert_eq!(from_int.cents(), 5000);
    }
}
