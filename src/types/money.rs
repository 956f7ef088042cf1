//! Money and rate types with precision guarantees for financial calculations.
//!
//! # Design Rationale
//! All monetary values use `Decimal` to avoid floating-point errors.
//! We define newtypes for semantic clarity and type safety. Rounding
//! throughout the crate is half-up at the boundary of each computed line;
//! intermediate products stay at full precision.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Represents a monetary amount. Internally full precision; rounded to
/// cents only when a line item is finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(dec!(0));

    /// Create a new Money value from a raw decimal.
    #[inline]
    pub fn new(value: Decimal) -> Self {
        Money(value)
    }

    /// Create from cents (integer)
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Create from dollar amount (may have decimals)
    #[inline]
    pub fn from_dollars(dollars: Decimal) -> Self {
        Money(dollars)
    }

    /// Get the raw decimal value
    #[inline]
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Round to nearest cent, half up. The crate-wide money rounding policy.
    #[inline]
    pub fn round_cents(&self) -> Self {
        Money(
            self.0
                .round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Round up to the next cent (ceiling)
    #[inline]
    pub fn ceil_cents(&self) -> Self {
        Money((self.0 * dec!(100)).ceil() / dec!(100))
    }

    /// Round down to the previous cent (floor)
    #[inline]
    pub fn floor_cents(&self) -> Self {
        Money((self.0 * dec!(100)).floor() / dec!(100))
    }

    /// Check if value is negative
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < dec!(0)
    }

    /// Check if value is zero
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == dec!(0)
    }

    /// Return the absolute value
    #[inline]
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Return the maximum of two values
    #[inline]
    pub fn max(self, other: Self) -> Self {
        if self.0 >= other.0 {
            self
        } else {
            other
        }
    }

    /// Return the minimum of two values
    #[inline]
    pub fn min(self, other: Self) -> Self {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }

    /// Clamp value to zero (no negatives)
    #[inline]
    pub fn clamp_zero(self) -> Self {
        self.max(Money::ZERO)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::ZERO
    }
}

impl Add for Money {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Decimal) -> Self::Output {
        Money(self.0 * rhs)
    }
}

impl Div<Decimal> for Money {
    type Output = Self;
    #[inline]
    fn div(self, rhs: Decimal) -> Self::Output {
        Money(self.0 / rhs)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

/// Represents a rate (interest, cap, growth, tax) as a decimal fraction.
/// Stored as the actual decimal value (e.g., 0.0725 for 7.25%); rounded to
/// 4 decimal places at output boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(dec!(0));

    /// Create a rate from decimal form (e.g., 0.0725 for 7.25%)
    #[inline]
    pub fn from_decimal(value: Decimal) -> Self {
        Rate(value)
    }

    /// Create a rate from percentage form (e.g., 7.25 for 7.25%)
    #[inline]
    pub fn from_percentage(percent: Decimal) -> Self {
        Rate(percent / dec!(100))
    }

    /// Get the decimal value
    #[inline]
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Get as percentage (e.g., 7.25)
    #[inline]
    pub fn as_percentage(&self) -> Decimal {
        self.0 * dec!(100)
    }

    /// Apply this rate to a money amount
    #[inline]
    pub fn apply(&self, amount: Money) -> Money {
        amount * self.0
    }

    /// Round to 4 decimal places, the crate-wide rate precision.
    #[inline]
    pub fn round_4dp(&self) -> Self {
        Rate(self.0.round_dp(4))
    }

    /// Clamp between two bounds (both inclusive).
    #[inline]
    pub fn clamp(self, min: Rate, max: Rate) -> Self {
        if self.0 < min.0 {
            min
        } else if self.0 > max.0 {
            max
        } else {
            self
        }
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::ZERO
    }
}

impl Add for Rate {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Rate(self.0 + rhs.0)
    }
}

impl Sub for Rate {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Rate(self.0 - rhs.0)
    }
}

impl Mul<Decimal> for Rate {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Decimal) -> Self::Output {
        Rate(self.0 * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_arithmetic() {
        let a = Money::from_cents(1000); // $10.00
        let b = Money::from_cents(250); // $2.50

        assert_eq!((a + b).as_decimal(), dec!(12.50));
        assert_eq!((a - b).as_decimal(), dec!(7.50));
    }

    #[test]
    fn test_money_rounding_half_up() {
        let m = Money::new(dec!(10.125));
        assert_eq!(m.round_cents().as_decimal(), dec!(10.13));
        assert_eq!(m.ceil_cents().as_decimal(), dec!(10.13));
        assert_eq!(m.floor_cents().as_decimal(), dec!(10.12));
    }

    #[test]
    fn test_rate_application() {
        let rate = Rate::from_percentage(dec!(7.25));
        let amount = Money::new(dec!(10000));
        let tax = rate.apply(amount);
        assert_eq!(tax.as_decimal(), dec!(725));
    }

    #[test]
    fn test_rate_clamp() {
        let low = Rate::from_percentage(dec!(0.5));
        let high = Rate::from_percentage(dec!(6.0));
        let r = Rate::from_percentage(dec!(10.0));
        assert_eq!(r.clamp(low, high), high);
    }

    #[test]
    fn test_money_sum() {
        let values = vec![Money::from_cents(100), Money::from_cents(200)];
        let total: Money = values.into_iter().sum();
        assert_eq!(total.as_decimal(), dec!(3.00));
    }
}
