//! Catalog error types.

use common::ProductId;
use domain::{DiscountError, DomainError, ErrorKind, MoneyError, ProductError};
use store::StoreError;
use thiserror::Error;

/// Errors returned by catalog use cases.
///
/// Domain and store errors are carried unchanged so callers can inspect the
/// most specific cause.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No product exists with the given id.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// A domain rule rejected the command.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The store failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// An event could not be serialized for the outbox.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A money amount does not fit the persisted 64-bit representation.
    #[error("Price of product {0} does not fit in 64-bit storage")]
    PriceOutOfRange(ProductId),

    /// A stored row could not be turned back into a product.
    #[error("Invalid stored product {product_id}: {reason}")]
    InvalidRow {
        product_id: ProductId,
        reason: String,
    },
}

/// Error taxonomy used by transports to choose a response code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NotFound,
    Validation,
    BusinessRule,
    Infrastructure,
}

impl CatalogError {
    pub fn kind(&self) -> ErrorCategory {
        match self {
            CatalogError::NotFound(_) => ErrorCategory::NotFound,
            CatalogError::Domain(err) => match err.kind() {
                ErrorKind::Validation => ErrorCategory::Validation,
                ErrorKind::BusinessRule => ErrorCategory::BusinessRule,
            },
            CatalogError::Store(_)
            | CatalogError::Serialization(_)
            | CatalogError::PriceOutOfRange(_)
            | CatalogError::InvalidRow { .. } => ErrorCategory::Infrastructure,
        }
    }
}

impl From<ProductError> for CatalogError {
    fn from(err: ProductError) -> Self {
        CatalogError::Domain(err.into())
    }
}

impl From<MoneyError> for CatalogError {
    fn from(err: MoneyError) -> Self {
        CatalogError::Domain(err.into())
    }
}

impl From<DiscountError> for CatalogError {
    fn from(err: DiscountError) -> Self {
        CatalogError::Domain(err.into())
    }
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_the_taxonomy() {
        assert_eq!(
            CatalogError::NotFound(ProductId::new("x")).kind(),
            ErrorCategory::NotFound
        );
        assert_eq!(
            CatalogError::from(ProductError::EmptyName).kind(),
            ErrorCategory::Validation
        );
        assert_eq!(
            CatalogError::from(MoneyError::InvalidValue).kind(),
            ErrorCategory::Validation
        );
        assert_eq!(
            CatalogError::from(ProductError::AlreadyActive).kind(),
            ErrorCategory::BusinessRule
        );
        assert_eq!(
            CatalogError::from(StoreError::MissingRow {
                table: "products",
                key: "x".to_string()
            })
            .kind(),
            ErrorCategory::Infrastructure
        );
    }
}
