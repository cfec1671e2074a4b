//! Price calculations derived from a product and its discount.

use chrono::{DateTime, Utc};

use crate::discount::Discount;
use crate::money::Money;
use crate::product::{Product, ProductError};

/// Itemised price of a product at a given instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceBreakdown {
    pub base_price: Money,
    pub discount_percentage: Option<u32>,
    pub discount_amount: Money,
    pub effective_price: Money,
    pub has_discount: bool,
}

/// Stateless pricing helpers.
pub struct PricingCalculator;

impl PricingCalculator {
    /// Amount taken off `base` by `discount`.
    pub fn discount_amount(base: &Money, discount: &Discount) -> Money {
        base.apply_percentage(discount.percentage())
    }

    /// Total saved when buying `quantity` units at the discounted price.
    pub fn savings(base: &Money, discount: &Discount, quantity: u32) -> Money {
        Self::discount_amount(base, discount).times(quantity)
    }

    /// Checks that `discount` may be attached to `product` at `now`: the
    /// product must be active and the discount must not have ended.
    /// Discounts that have not started yet are allowed.
    ///
    /// Stricter than [`Product::apply_discount`], which still accepts a
    /// window that has already closed.
    pub fn validate_discount_application(
        product: &Product,
        discount: &Discount,
        now: DateTime<Utc>,
    ) -> Result<(), ProductError> {
        if !product.status().can_apply_discount() {
            return Err(ProductError::NotActive);
        }
        if discount.is_expired(now) {
            return Err(ProductError::DiscountExpired);
        }
        Ok(())
    }

    /// Breaks down the product's price at `now`. Discounts outside their
    /// window contribute nothing.
    pub fn price_breakdown(product: &Product, now: DateTime<Utc>) -> PriceBreakdown {
        let base_price = product.base_price().clone();
        match product.discount() {
            Some(discount) if discount.is_valid_at(now) => PriceBreakdown {
                discount_percentage: Some(discount.percentage()),
                discount_amount: Self::discount_amount(&base_price, discount),
                effective_price: discount.apply(&base_price),
                has_discount: true,
                base_price,
            },
            _ => PriceBreakdown {
                discount_percentage: None,
                discount_amount: Money::zero(),
                effective_price: base_price.clone(),
                has_discount: false,
                base_price,
            },
        }
    }
}
