//! Product aggregate and related types.

mod aggregate;
mod changes;
mod events;
mod status;

pub use aggregate::{
    MAX_CATEGORY_LENGTH, MAX_NAME_LENGTH, Product, TrackedProduct, Transition,
};
pub use changes::{ChangeTracker, Field};
pub use events::{
    DiscountAppliedData, DiscountRemovedData, ProductActivatedData, ProductArchivedData,
    ProductCreatedData, ProductDeactivatedData, ProductEvent, ProductUpdatedData,
};
pub use status::ProductStatus;

use thiserror::Error;

use crate::error::ErrorKind;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductError {
    #[error("product name is required")]
    EmptyName,

    #[error("product name is {length} characters long (maximum {max})")]
    NameTooLong { length: usize, max: usize },

    #[error("product category is required")]
    EmptyCategory,

    #[error("product category is {length} characters long (maximum {max})")]
    CategoryTooLong { length: usize, max: usize },

    #[error("product price must be greater than zero")]
    ZeroPrice,

    #[error("invalid product status: {0}")]
    InvalidStatus(String),

    #[error("cannot activate an archived product")]
    CannotActivateArchived,

    #[error("product is already active")]
    AlreadyActive,

    #[error("cannot deactivate an archived product")]
    CannotDeactivateArchived,

    #[error("product is already inactive")]
    AlreadyInactive,

    #[error("product is already archived")]
    AlreadyArchived,

    #[error("must deactivate product before archiving")]
    MustDeactivateFirst,

    #[error("cannot update an archived product")]
    CannotUpdateArchived,

    #[error("product is not active")]
    NotActive,

    #[error("discount has expired")]
    DiscountExpired,

    #[error("no discount to remove")]
    NoDiscountToRemove,
}

impl ProductError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProductError::EmptyName
            | ProductError::NameTooLong { .. }
            | ProductError::EmptyCategory
            | ProductError::CategoryTooLong { .. }
            | ProductError::ZeroPrice
            | ProductError::InvalidStatus(_) => ErrorKind::Validation,
            ProductError::CannotActivateArchived
            | ProductError::AlreadyActive
            | ProductError::CannotDeactivateArchived
            | ProductError::AlreadyInactive
            | ProductError::AlreadyArchived
            | ProductError::MustDeactivateFirst
            | ProductError::CannotUpdateArchived
            | ProductError::NotActive
            | ProductError::DiscountExpired
            | ProductError::NoDiscountToRemove => ErrorKind::BusinessRule,
        }
    }
}
