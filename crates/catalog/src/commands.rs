//! Product commands.

use chrono::{DateTime, Utc};
use common::ProductId;

/// Command to create a new product in draft status.
#[derive(Debug, Clone)]
pub struct CreateProduct {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price_numerator: i64,
    pub price_denominator: i64,
}

impl CreateProduct {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        price_numerator: i64,
        price_denominator: i64,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            category: category.into(),
            price_numerator,
            price_denominator,
        }
    }
}

/// Command to change a product's name, description and category.
#[derive(Debug, Clone)]
pub struct UpdateProduct {
    pub product_id: ProductId,
    pub name: String,
    pub description: String,
    pub category: String,
}

impl UpdateProduct {
    pub fn new(
        product_id: ProductId,
        name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            product_id,
            name: name.into(),
            description: description.into(),
            category: category.into(),
        }
    }
}

/// Command to activate a product.
#[derive(Debug, Clone)]
pub struct ActivateProduct {
    pub product_id: ProductId,
}

impl ActivateProduct {
    pub fn new(product_id: ProductId) -> Self {
        Self { product_id }
    }
}

/// Command to deactivate a product.
#[derive(Debug, Clone)]
pub struct DeactivateProduct {
    pub product_id: ProductId,
}

impl DeactivateProduct {
    pub fn new(product_id: ProductId) -> Self {
        Self { product_id }
    }
}

/// Command to archive a product.
#[derive(Debug, Clone)]
pub struct ArchiveProduct {
    pub product_id: ProductId,
}

impl ArchiveProduct {
    pub fn new(product_id: ProductId) -> Self {
        Self { product_id }
    }
}

/// Command to attach a percentage discount to an active product.
#[derive(Debug, Clone)]
pub struct ApplyDiscount {
    pub product_id: ProductId,
    pub percentage: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ApplyDiscount {
    pub fn new(
        product_id: ProductId,
        percentage: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            product_id,
            percentage,
            start,
            end,
        }
    }
}

/// Command to remove a product's discount.
#[derive(Debug, Clone)]
pub struct RemoveDiscount {
    pub product_id: ProductId,
}

impl RemoveDiscount {
    pub fn new(product_id: ProductId) -> Self {
        Self { product_id }
    }
}
