//! Exact, non-negative monetary amounts.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};
use thiserror::Error;

/// Errors raised when constructing or combining money values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// The denominator was zero.
    #[error("invalid money value: denominator must not be zero")]
    InvalidValue,

    /// The value, or the operation's result, would be negative.
    #[error("money cannot be negative")]
    Negative,
}

/// A currency amount held as a reduced rational number.
///
/// Every operation returns a new value. Comparisons are exact; the
/// two-decimal `Display` form is for humans only.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(BigRational);

impl Money {
    /// Creates a money value from a numerator and denominator.
    pub fn new(numerator: i64, denominator: i64) -> Result<Self, MoneyError> {
        if denominator == 0 {
            return Err(MoneyError::InvalidValue);
        }
        if numerator < 0 {
            return Err(MoneyError::Negative);
        }
        Self::from_ratio(BigRational::new(
            BigInt::from(numerator),
            BigInt::from(denominator),
        ))
    }

    /// Wraps an existing rational, rejecting negative values.
    pub fn from_ratio(value: BigRational) -> Result<Self, MoneyError> {
        if value.is_negative() {
            return Err(MoneyError::Negative);
        }
        Ok(Self(value))
    }

    /// Returns zero.
    pub fn zero() -> Self {
        Self(BigRational::zero())
    }

    /// Returns the reduced numerator.
    pub fn numerator(&self) -> &BigInt {
        self.0.numer()
    }

    /// Returns the reduced (always positive) denominator.
    pub fn denominator(&self) -> &BigInt {
        self.0.denom()
    }

    /// Returns the underlying rational.
    pub fn as_ratio(&self) -> &BigRational {
        &self.0
    }

    /// Returns numerator and denominator as `i64`, if both fit.
    pub fn to_i64_parts(&self) -> Option<(i64, i64)> {
        Some((self.0.numer().to_i64()?, self.0.denom().to_i64()?))
    }

    pub fn add(&self, other: &Money) -> Money {
        Money(&self.0 + &other.0)
    }

    /// Subtracts `other`, failing if the result would be negative.
    pub fn subtract(&self, other: &Money) -> Result<Money, MoneyError> {
        Self::from_ratio(&self.0 - &other.0)
    }

    /// Multiplies by a rational factor, failing if the factor is negative.
    pub fn multiply(&self, factor: &BigRational) -> Result<Money, MoneyError> {
        if factor.is_negative() {
            return Err(MoneyError::Negative);
        }
        Ok(Money(&self.0 * factor))
    }

    /// Multiplies by a whole quantity.
    pub fn times(&self, quantity: u32) -> Money {
        Money(&self.0 * BigRational::from_integer(BigInt::from(quantity)))
    }

    /// Returns `value * percentage / 100`.
    pub fn apply_percentage(&self, percentage: u32) -> Money {
        Money(&self.0 * percent(percentage))
    }

    /// Returns `value - value * percentage / 100`.
    ///
    /// Percentages above 100 saturate at zero.
    pub fn subtract_percentage(&self, percentage: u32) -> Money {
        Money(&self.0 * percent(100u32.saturating_sub(percentage)))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }
}

fn percent(value: u32) -> BigRational {
    BigRational::new(BigInt::from(value), BigInt::from(100))
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Money {
    /// Renders the amount with two decimals, rounding half up.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hundred = BigInt::from(100);
        let scaled = self.0.numer() * &hundred;
        let denom = self.0.denom();

        let mut cents = &scaled / denom;
        let remainder = &scaled % denom;
        if remainder * BigInt::from(2) >= *denom {
            cents += BigInt::from(1);
        }

        let whole = &cents / &hundred;
        let fraction = (&cents % &hundred).to_u32().unwrap_or_default();
        write!(f, "{whole}.{fraction:02}")
    }
}
