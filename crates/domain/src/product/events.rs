//! Product domain events.

use chrono::{DateTime, Utc};
use common::ProductId;

use crate::discount::Discount;
use crate::event::DomainEvent;
use crate::money::Money;

/// Events that can occur on a product aggregate.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductEvent {
    /// Product was created in draft status.
    ProductCreated(ProductCreatedData),

    /// Name, description or category changed.
    ProductUpdated(ProductUpdatedData),

    /// Product was activated.
    ProductActivated(ProductActivatedData),

    /// Product was deactivated.
    ProductDeactivated(ProductDeactivatedData),

    /// Product was archived (terminal).
    ProductArchived(ProductArchivedData),

    /// A discount was attached, replacing any previous one.
    DiscountApplied(DiscountAppliedData),

    /// The current discount was removed.
    DiscountRemoved(DiscountRemovedData),
}

impl DomainEvent for ProductEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ProductEvent::ProductCreated(_) => "product.created",
            ProductEvent::ProductUpdated(_) => "product.updated",
            ProductEvent::ProductActivated(_) => "product.activated",
            ProductEvent::ProductDeactivated(_) => "product.deactivated",
            ProductEvent::ProductArchived(_) => "product.archived",
            ProductEvent::DiscountApplied(_) => "product.discount_applied",
            ProductEvent::DiscountRemoved(_) => "product.discount_removed",
        }
    }

    fn aggregate_id(&self) -> &str {
        match self {
            ProductEvent::ProductCreated(data) => data.product_id.as_str(),
            ProductEvent::ProductUpdated(data) => data.product_id.as_str(),
            ProductEvent::ProductActivated(data) => data.product_id.as_str(),
            ProductEvent::ProductDeactivated(data) => data.product_id.as_str(),
            ProductEvent::ProductArchived(data) => data.product_id.as_str(),
            ProductEvent::DiscountApplied(data) => data.product_id.as_str(),
            ProductEvent::DiscountRemoved(data) => data.product_id.as_str(),
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ProductEvent::ProductCreated(data) => data.occurred_at,
            ProductEvent::ProductUpdated(data) => data.occurred_at,
            ProductEvent::ProductActivated(data) => data.occurred_at,
            ProductEvent::ProductDeactivated(data) => data.occurred_at,
            ProductEvent::ProductArchived(data) => data.occurred_at,
            ProductEvent::DiscountApplied(data) => data.occurred_at,
            ProductEvent::DiscountRemoved(data) => data.occurred_at,
        }
    }
}

/// Data for ProductCreated event.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCreatedData {
    pub product_id: ProductId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub base_price: Money,
    pub occurred_at: DateTime<Utc>,
}

/// Data for ProductUpdated event. Carries the values after the update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdatedData {
    pub product_id: ProductId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub occurred_at: DateTime<Utc>,
}

/// Data for ProductActivated event.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductActivatedData {
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Data for ProductDeactivated event.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDeactivatedData {
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Data for ProductArchived event.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductArchivedData {
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Data for DiscountApplied event.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountAppliedData {
    pub product_id: ProductId,
    pub percentage: u32,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub occurred_at: DateTime<Utc>,
}

/// Data for DiscountRemoved event.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountRemovedData {
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

// Convenience constructors for events
impl ProductEvent {
    pub fn product_created(
        product_id: ProductId,
        name: &str,
        description: &str,
        category: &str,
        base_price: Money,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        ProductEvent::ProductCreated(ProductCreatedData {
            product_id,
            name: name.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            base_price,
            occurred_at,
        })
    }

    pub fn product_updated(
        product_id: ProductId,
        name: &str,
        description: &str,
        category: &str,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        ProductEvent::ProductUpdated(ProductUpdatedData {
            product_id,
            name: name.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            occurred_at,
        })
    }

    pub fn product_activated(product_id: ProductId, occurred_at: DateTime<Utc>) -> Self {
        ProductEvent::ProductActivated(ProductActivatedData {
            product_id,
            occurred_at,
        })
    }

    pub fn product_deactivated(product_id: ProductId, occurred_at: DateTime<Utc>) -> Self {
        ProductEvent::ProductDeactivated(ProductDeactivatedData {
            product_id,
            occurred_at,
        })
    }

    pub fn product_archived(product_id: ProductId, occurred_at: DateTime<Utc>) -> Self {
        ProductEvent::ProductArchived(ProductArchivedData {
            product_id,
            occurred_at,
        })
    }

    pub fn discount_applied(
        product_id: ProductId,
        discount: &Discount,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        ProductEvent::DiscountApplied(DiscountAppliedData {
            product_id,
            percentage: discount.percentage(),
            start: discount.start(),
            end: discount.end(),
            occurred_at,
        })
    }

    pub fn discount_removed(product_id: ProductId, occurred_at: DateTime<Utc>) -> Self {
        ProductEvent::DiscountRemoved(DiscountRemovedData {
            product_id,
            occurred_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn event_types_use_dotted_names() {
        let id = ProductId::new("p-1");
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let discount = Discount::new(10, at, at).unwrap();

        let cases = [
            (
                ProductEvent::product_created(
                    id.clone(),
                    "n",
                    "d",
                    "c",
                    Money::new(1, 1).unwrap(),
                    at,
                ),
                "product.created",
            ),
            (
                ProductEvent::product_updated(id.clone(), "n", "d", "c", at),
                "product.updated",
            ),
            (ProductEvent::product_activated(id.clone(), at), "product.activated"),
            (
                ProductEvent::product_deactivated(id.clone(), at),
                "product.deactivated",
            ),
            (ProductEvent::product_archived(id.clone(), at), "product.archived"),
            (
                ProductEvent::discount_applied(id.clone(), &discount, at),
                "product.discount_applied",
            ),
            (
                ProductEvent::discount_removed(id.clone(), at),
                "product.discount_removed",
            ),
        ];

        for (event, expected) in cases {
            assert_eq!(event.event_type(), expected);
            assert_eq!(event.aggregate_id(), "p-1");
            assert_eq!(event.occurred_at(), at);
        }
    }
}
