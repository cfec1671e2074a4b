//! Projection error types.

use common::ProductId;
use thiserror::Error;

/// Errors that can occur while reading the catalog.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// No product exists with the given id.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// An error occurred in the store.
    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),

    /// A stored row holds values the read model cannot present.
    #[error("Invalid stored product {product_id}: {reason}")]
    InvalidRow {
        product_id: ProductId,
        reason: String,
    },

    /// The discounted price does not fit in 64-bit numerator/denominator.
    #[error("Effective price of product {0} overflows")]
    PriceOverflow(ProductId),
}

/// Result type for projection operations.
pub type Result<T> = std::result::Result<T, ProjectionError>;
