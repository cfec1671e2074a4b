//! Time-bounded percentage discounts.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::money::Money;

pub const MIN_DISCOUNT_PERCENTAGE: i64 = 1;
pub const MAX_DISCOUNT_PERCENTAGE: i64 = 100;

/// Errors raised when constructing a discount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscountError {
    #[error("invalid discount percentage {0}: must be between 1 and 100")]
    InvalidPercentage(i64),

    #[error("invalid discount period: end {end} is before start {start}")]
    InvalidPeriod {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

/// A percentage-off offer valid between two instants, both inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discount {
    percentage: u32,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Discount {
    pub fn new(
        percentage: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self, DiscountError> {
        if !(MIN_DISCOUNT_PERCENTAGE..=MAX_DISCOUNT_PERCENTAGE).contains(&percentage) {
            return Err(DiscountError::InvalidPercentage(percentage));
        }
        if end < start {
            return Err(DiscountError::InvalidPeriod { start, end });
        }
        Ok(Self {
            percentage: percentage as u32,
            start,
            end,
        })
    }

    pub fn percentage(&self) -> u32 {
        self.percentage
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// True when `start <= at <= end`.
    pub fn is_valid_at(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }

    /// True once `at` is strictly past the end.
    pub fn is_expired(&self, at: DateTime<Utc>) -> bool {
        at > self.end
    }

    /// True once `at` has reached the start.
    pub fn has_started(&self, at: DateTime<Utc>) -> bool {
        at >= self.start
    }

    /// Returns the discounted price.
    pub fn apply(&self, price: &Money) -> Money {
        price.subtract_percentage(self.percentage)
    }
}
