//! Domain error types.

use thiserror::Error;

use crate::discount::DiscountError;
use crate::money::MoneyError;
use crate::product::ProductError;

/// Broad class of a domain failure, used by outer layers to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input caught at a construction or update boundary.
    Validation,
    /// Operation not permitted in the current state.
    BusinessRule,
}

/// Errors that can occur during domain operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    #[error("Discount error: {0}")]
    Discount(#[from] DiscountError),

    #[error("Product error: {0}")]
    Product(#[from] ProductError),
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Money(_) | DomainError::Discount(_) => ErrorKind::Validation,
            DomainError::Product(err) => err.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_object_errors_are_validation() {
        assert_eq!(DomainError::from(MoneyError::Negative).kind(), ErrorKind::Validation);
        assert_eq!(
            DomainError::from(DiscountError::InvalidPercentage(0)).kind(),
            ErrorKind::Validation
        );
    }

    #[test]
    fn product_errors_keep_their_class() {
        assert_eq!(
            DomainError::from(ProductError::NameTooLong { length: 300, max: 255 }).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            DomainError::from(ProductError::MustDeactivateFirst).kind(),
            ErrorKind::BusinessRule
        );
    }
}
