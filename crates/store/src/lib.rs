//! Storage collaborator for the product catalog.
//!
//! Exposes read-by-key, filtered/paginated queries and an all-or-nothing
//! `apply` over a batch of [`Mutation`]s. The [`CommitPlan`] and
//! [`Committer`] build on that to give the write side its atomicity.

pub mod committer;
pub mod error;
pub mod memory;
pub mod mutation;
pub mod plan;
pub mod postgres;
pub mod query;
pub mod row;
pub mod store;

pub use common::{EventId, ProductId};
pub use committer::{Committer, StoreCommitter};
pub use error::{Result, StoreError};
pub use memory::InMemoryCatalogStore;
pub use mutation::{Mutation, ProductColumn, ProductUpdate};
pub use plan::CommitPlan;
pub use postgres::PostgresCatalogStore;
pub use query::{ProductPage, ProductQuery};
pub use row::{DiscountColumns, OutboxRow, OutboxStatus, ProductRow};
pub use store::{CatalogStore, OutboxStream};
