//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation so that cart totals are exact:
//! `5.50 * 2` is `1100` cents, never `10.999999`. Every amount in the store
//! is US dollars.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

const CENTS_PER_DOLLAR: i64 = 100;

/// A US dollar amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: i64,
}

impl Money {
    /// Shorthand for a USD amount in cents.
    pub const fn usd(amount_cents: i64) -> Self {
        Self { amount_cents }
    }

    /// Create a Money value from a decimal dollar amount, rounding to the nearest cent.
    ///
    /// ```
    /// use brew_commerce::money::Money;
    /// let price = Money::from_decimal(5.50);
    /// assert_eq!(price.amount_cents, 550);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        Self::usd((amount * CENTS_PER_DOLLAR as f64).round() as i64)
    }

    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Convert to a decimal dollar value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / CENTS_PER_DOLLAR as f64
    }

    /// Format as a display string (e.g., "$11.00").
    ///
    /// Formatted from the integer amount so no float rounding leaks in.
    pub fn display(&self) -> String {
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        let per = CENTS_PER_DOLLAR as u64;
        format!("{}${}.{:02}", sign, abs / per, abs % per)
    }

    /// Multiply by a quantity, saturating at the numeric bounds.
    pub fn saturating_multiply(&self, factor: i64) -> Money {
        Money::usd(self.amount_cents.saturating_mul(factor))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::usd(self.amount_cents.saturating_add(other.amount_cents))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Serde adapter that writes an amount as a plain decimal number (`5.5`).
///
/// This is the shape the persisted cart and external menu files use.
pub mod as_decimal {
    use super::Money;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(money.to_decimal())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Ok(Money::from_decimal(amount))
    }
}
