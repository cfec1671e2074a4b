//! Read model for the catalog query side.
//!
//! Queries read stored product rows directly and never touch the aggregate:
//! - [`ProductQueries`] for by-id lookups, filtered pages and category counts
//! - [`ProductView`], the denormalized shape returned to callers
//! - [`Pagination`] and [`ProductListFilter`] describing list requests
//!
//! Effective prices are computed at read time from the query's own clock.

pub mod error;
pub mod pagination;
pub mod queries;
pub mod view;

pub use error::{ProjectionError, Result};
pub use pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Pagination, ProductListFilter, ProductPage};
pub use queries::ProductQueries;
pub use view::{DiscountView, PriceView, ProductView};
