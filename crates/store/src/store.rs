//! The storage collaborator contract.

use async_trait::async_trait;
use futures_core::stream::BoxStream;

use crate::{
    Mutation, OutboxRow, OutboxStatus, ProductId, ProductPage, ProductQuery, ProductRow, Result,
};

/// Stream of outbox rows for a relay to consume.
pub type OutboxStream<'a> = BoxStream<'a, Result<OutboxRow>>;

/// Storage for product rows and outbox events.
///
/// Implementations must make [`CatalogStore::apply`] all-or-nothing: either
/// every mutation in the batch becomes visible or none does.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Reads a product row by key.
    async fn get_product(&self, id: &ProductId) -> Result<Option<ProductRow>>;

    /// Returns one page of matching rows and the total match count.
    async fn query_products(&self, query: &ProductQuery) -> Result<ProductPage>;

    /// Counts matching rows, ignoring limit and offset.
    async fn count_products(&self, query: &ProductQuery) -> Result<u64>;

    /// Applies all mutations atomically, in order.
    async fn apply(&self, mutations: Vec<Mutation>) -> Result<()>;

    /// Returns the outbox rows written for one aggregate, oldest first.
    async fn outbox_events_for(&self, aggregate_id: &str) -> Result<Vec<OutboxRow>>;

    /// Streams outbox rows with the given status, oldest first.
    fn stream_outbox(&self, status: OutboxStatus) -> OutboxStream<'_>;
}
