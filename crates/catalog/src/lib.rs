//! Write side of the product catalog.
//!
//! Each command follows the same protocol: load (or create) a product, run
//! exactly one domain transition, map the result to a [`store::CommitPlan`]
//! holding the product mutation plus one outbox insert per event, and hand
//! the plan to a [`store::Committer`].

pub mod commands;
pub mod error;
pub mod handler;
pub mod outbox;
pub mod repository;
pub mod service;

pub use commands::{
    ActivateProduct, ApplyDiscount, ArchiveProduct, CreateProduct, DeactivateProduct,
    RemoveDiscount, UpdateProduct,
};
pub use error::{CatalogError, ErrorCategory, Result};
pub use handler::{CommandHandler, CommandResult};
pub use outbox::{OutboxRepository, serialize_event};
pub use repository::{ProductRepository, product_from_row, product_mutation, product_to_row};
pub use service::ProductService;
