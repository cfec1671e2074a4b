//! Shared types for the product catalog workspace.
//!
//! Identifiers used across the write and read sides, plus the `Clock`
//! seam through which every component obtains the current time.

pub mod clock;
pub mod types;

pub use clock::{Clock, FixedClock, SharedClock, SystemClock};
pub use types::{EventId, ProductId};
