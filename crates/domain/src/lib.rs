//! Domain layer for the product catalog.
//!
//! This crate provides the core domain types including:
//! - `Money`, an exact non-negative rational amount
//! - `Discount`, a percentage-off offer with a validity window
//! - the `Product` aggregate with its status machine, change tracking and events
//! - `PricingCalculator` for price breakdowns
//!
//! Nothing here knows about storage; persistence mapping lives in outer crates.

pub mod discount;
pub mod error;
pub mod event;
pub mod money;
pub mod pricing;
pub mod product;

pub use discount::{Discount, DiscountError, MAX_DISCOUNT_PERCENTAGE, MIN_DISCOUNT_PERCENTAGE};
pub use error::{DomainError, ErrorKind};
pub use event::DomainEvent;
pub use money::{Money, MoneyError};
pub use pricing::{PriceBreakdown, PricingCalculator};
pub use product::{
    ChangeTracker, DiscountAppliedData, DiscountRemovedData, Field, MAX_CATEGORY_LENGTH,
    MAX_NAME_LENGTH, Product, ProductActivatedData, ProductArchivedData, ProductCreatedData,
    ProductDeactivatedData, ProductError, ProductEvent, ProductStatus, ProductUpdatedData,
    TrackedProduct, Transition,
};
