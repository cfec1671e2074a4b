//! Denormalized product view.

use chrono::{DateTime, Utc};
use common::ProductId;
use domain::ProductStatus;
use store::{DiscountColumns, ProductRow};

use crate::error::{ProjectionError, Result};

/// A price as an unreduced numerator/denominator pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceView {
    pub numerator: i64,
    pub denominator: i64,
}

/// Discount as stored on the product row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountView {
    pub percentage: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DiscountView {
    /// True when `now` lies within the discount window, inclusive.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.start <= now && now <= self.end
    }
}

impl From<DiscountColumns> for DiscountView {
    fn from(columns: DiscountColumns) -> Self {
        Self {
            percentage: columns.percentage,
            start: columns.start,
            end: columns.end,
        }
    }
}

/// Read-side representation of a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub base_price: PriceView,
    pub effective_price: PriceView,
    pub discount: Option<DiscountView>,
    pub discount_active: bool,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub archived_at: Option<DateTime<Utc>>,
}

impl ProductView {
    /// Builds the view of `row` as seen at `now`.
    pub fn from_row(row: ProductRow, now: DateTime<Utc>) -> Result<Self> {
        let status = row
            .status
            .parse::<ProductStatus>()
            .map_err(|e| ProjectionError::InvalidRow {
                product_id: row.id.clone(),
                reason: e.to_string(),
            })?;

        let base_price = PriceView {
            numerator: row.price_num,
            denominator: row.price_denom,
        };
        let discount = row.discount.map(DiscountView::from);
        let active_discount = discount.filter(|d| d.is_active_at(now));
        let effective_price = match active_discount {
            Some(d) => discounted_price(&row.id, base_price, d.percentage)?,
            None => base_price,
        };

        Ok(Self {
            id: row.id,
            name: row.name,
            description: row.description,
            category: row.category,
            base_price,
            effective_price,
            discount,
            discount_active: active_discount.is_some(),
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
            archived_at: row.archived_at,
        })
    }
}

/// `base * (100 - pct) / 100`, left unreduced.
fn discounted_price(id: &ProductId, base: PriceView, percentage: i64) -> Result<PriceView> {
    if !(1..=100).contains(&percentage) {
        return Err(ProjectionError::InvalidRow {
            product_id: id.clone(),
            reason: format!("discount percentage {percentage} out of range"),
        });
    }

    let overflow = || ProjectionError::PriceOverflow(id.clone());
    Ok(PriceView {
        numerator: base
            .numerator
            .checked_mul(100 - percentage)
            .ok_or_else(overflow)?,
        denominator: base.denominator.checked_mul(100).ok_or_else(overflow)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn row(discount: Option<DiscountColumns>) -> ProductRow {
        ProductRow {
            id: ProductId::new("p-1"),
            name: "Desk Lamp".to_string(),
            description: String::new(),
            category: "lighting".to_string(),
            price_num: 1999,
            price_denom: 100,
            discount,
            status: "active".to_string(),
            created_at: t0(),
            updated_at: t0(),
            archived_at: None,
        }
    }

    fn twenty_percent() -> DiscountColumns {
        DiscountColumns {
            percentage: 20,
            start: t0(),
            end: t0() + Duration::days(7),
        }
    }

    #[test]
    fn no_discount_keeps_base_price() {
        let view = ProductView::from_row(row(None), t0()).unwrap();
        assert_eq!(view.effective_price, view.base_price);
        assert!(!view.discount_active);
        assert_eq!(view.status, ProductStatus::Active);
    }

    #[test]
    fn active_discount_is_applied_unreduced() {
        let view = ProductView::from_row(row(Some(twenty_percent())), t0()).unwrap();
        assert!(view.discount_active);
        assert_eq!(
            view.effective_price,
            PriceView {
                numerator: 1999 * 80,
                denominator: 10000
            }
        );
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let d = twenty_percent();
        assert!(ProductView::from_row(row(Some(d)), d.end).unwrap().discount_active);
        assert!(
            !ProductView::from_row(row(Some(d)), d.end + Duration::seconds(1))
                .unwrap()
                .discount_active
        );
        assert!(
            !ProductView::from_row(row(Some(d)), d.start - Duration::seconds(1))
                .unwrap()
                .discount_active
        );
    }

    #[test]
    fn overflow_is_reported() {
        let mut r = row(Some(twenty_percent()));
        r.price_num = i64::MAX;
        let err = ProductView::from_row(r, t0()).unwrap_err();
        assert!(matches!(err, ProjectionError::PriceOverflow(_)));
    }

    #[test]
    fn unknown_status_is_invalid() {
        let mut r = row(None);
        r.status = "gone".to_string();
        assert!(matches!(
            ProductView::from_row(r, t0()),
            Err(ProjectionError::InvalidRow { .. })
        ));
    }
}
