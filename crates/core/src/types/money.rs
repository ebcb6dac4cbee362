//! Fixed-point money type used for prices and order totals.
//!
//! All currency arithmetic in Trailpass goes through [`Money`] so that
//! repeated additions never accumulate floating-point drift. An order total
//! computed from one hundred lines is exactly the sum of its line totals.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Money`] value.
#[derive(thiserror::Error, Debug, Clone)]
pub enum MoneyError {
    /// Monetary amounts in this system are never negative.
    #[error("amount cannot be negative: {0}")]
    Negative(Decimal),
}

/// A non-negative fixed-point currency amount (USD).
///
/// Wraps [`rust_decimal::Decimal`] and is the only representation prices and
/// totals take anywhere in the system. Line totals (`unit price x quantity`)
/// and order totals are exact; catalog prices locked into an order at
/// checkout never change afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    /// Zero dollars.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a `Money` value from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Negative`] if the amount is below zero.
    pub fn new(amount: Decimal) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a `Money` value from whole currency units (e.g., dollars).
    ///
    /// # Panics
    ///
    /// Never panics; whole units are always representable.
    #[must_use]
    pub fn from_major(units: u64) -> Self {
        Self(Decimal::from(units))
    }

    /// Create a `Money` value from minor currency units (e.g., cents).
    #[must_use]
    pub fn from_cents(cents: u64) -> Self {
        Self(Decimal::new(
            i64::try_from(cents).unwrap_or(i64::MAX),
            2,
        ))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Exact line total: this unit price multiplied by a quantity.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Whether this amount is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Money {
    /// Formats with exactly two decimal places, e.g. `40.00`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Money {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// SQLx support (with postgres feature): stored as NUMERIC
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Money {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Decimal as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Decimal as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Money {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <Decimal as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self::new(amount)?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Money {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Decimal as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_rejects_negative() {
        assert!(matches!(
            Money::new(dec("-0.01")),
            Err(MoneyError::Negative(_))
        ));
    }

    #[test]
    fn test_accepts_zero_and_positive() {
        assert!(Money::new(dec("0")).is_ok());
        assert!(Money::new(dec("19.99")).is_ok());
    }

    #[test]
    fn test_times_is_exact() {
        let price = Money::new(dec("20.00")).unwrap();
        assert_eq!(price.times(2).amount(), dec("40.00"));
    }

    #[test]
    fn test_sum_is_exact() {
        // 0.10 summed ten times is exactly 1.00 in fixed point.
        let dime = Money::new(dec("0.10")).unwrap();
        let total: Money = std::iter::repeat_n(dime, 10).sum();
        assert_eq!(total.amount(), dec("1.00"));
    }

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Money::from_major(40).to_string(), "40.00");
        assert_eq!(Money::new(dec("8.5")).unwrap().to_string(), "8.50");
        assert_eq!(Money::from_cents(1234).to_string(), "12.34");
    }

    #[test]
    fn test_serde_rejects_negative() {
        let result: Result<Money, _> = serde_json::from_str("\"-5\"");
        assert!(result.is_err());
    }
}
