//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are held as an amount in the smallest currency unit (paise) and
//! exposed as [`rust_decimal::Decimal`] values so display and totals never
//! go through floating point.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A monetary amount.
///
/// Internally an integer count of the smallest currency unit, so values
/// round-trip exactly through storage and arithmetic.
///
/// # Example
///
/// ```
/// use tillpoint_core::Price;
///
/// let unit = Price::from_cents(120_000); // 1200.00
/// let line = unit.times(5);
/// assert_eq!(line.to_string(), "6000.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(i64);

impl Price {
    /// The zero amount.
    pub const ZERO: Self = Self(0);

    /// Create a price from an amount in the smallest currency unit.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// The amount in the smallest currency unit.
    #[must_use]
    pub const fn as_cents(&self) -> i64 {
        self.0
    }

    /// The amount in the currency's standard unit (e.g. 1200.00).
    #[must_use]
    pub fn amount(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// This price multiplied by a line quantity.
    #[must_use]
    pub const fn times(&self, quantity: i64) -> Self {
        Self(self.0 * quantity)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{:.2}", self.amount()))
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let amount: Decimal = s.parse().map_err(DeError::custom)?;
        let cents = (amount * Decimal::new(100, 0))
            .normalize()
            .to_i64()
            .ok_or_else(|| DeError::custom("price out of range"))?;
        Ok(Self(cents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_is_decimal() {
        let p = Price::from_cents(120_000);
        assert_eq!(p.amount(), Decimal::new(120_000, 2));
        assert_eq!(p.to_string(), "1200.00");
    }

    #[test]
    fn test_line_totals() {
        let total: Price = [Price::from_cents(120_000).times(5), Price::from_cents(80_000).times(2)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_cents(760_000));
        assert_eq!(total.to_string(), "7600.00");
    }

    #[test]
    fn test_serde_as_decimal_string() {
        let p = Price::from_cents(45_000_00);
        assert_eq!(serde_json::to_string(&p).unwrap(), "\"45000.00\"");
        let back: Price = serde_json::from_str("\"45000.00\"").unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn test_deserialize_rejects_garbage() {
        assert!(serde_json::from_str::<Price>("\"not-a-price\"").is_err());
    }
}
