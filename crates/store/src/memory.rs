use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::StreamExt;
use futures_util::stream;
use tokio::sync::RwLock;

use crate::{
    Mutation, OutboxRow, OutboxStatus, ProductId, ProductPage, ProductQuery, ProductRow, Result,
    StoreError,
    store::{CatalogStore, OutboxStream},
};

#[derive(Debug, Clone, Default)]
struct Tables {
    products: HashMap<ProductId, ProductRow>,
    outbox: Vec<OutboxRow>,
}

impl Tables {
    fn apply(&mut self, mutation: Mutation) -> Result<()> {
        match mutation {
            Mutation::InsertProduct(row) => {
                if self.products.contains_key(&row.id) {
                    return Err(StoreError::DuplicateKey {
                        table: "products",
                        key: row.id.to_string(),
                    });
                }
                self.products.insert(row.id.clone(), row);
            }
            Mutation::UpdateProduct(update) => {
                let row = self.products.get_mut(update.id()).ok_or_else(|| {
                    StoreError::MissingRow {
                        table: "products",
                        key: update.id().to_string(),
                    }
                })?;
                for column in update.columns() {
                    column.write_to(row);
                }
            }
            Mutation::InsertOutboxEvent(row) => {
                if self.outbox.iter().any(|e| e.event_id == row.event_id) {
                    return Err(StoreError::DuplicateKey {
                        table: "outbox_events",
                        key: row.event_id.to_string(),
                    });
                }
                self.outbox.push(row);
            }
        }
        Ok(())
    }

    fn matching<'a>(&'a self, query: &'a ProductQuery) -> impl Iterator<Item = &'a ProductRow> {
        self.products.values().filter(move |row| query.matches(row))
    }
}

/// In-memory catalog store implementation for testing.
///
/// This implementation keeps all rows in memory and provides
/// the same interface as the PostgreSQL implementation. Batches are
/// staged on a copy of the tables and swapped in only when every
/// mutation succeeds.
#[derive(Clone, Default)]
pub struct InMemoryCatalogStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryCatalogStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of product rows.
    pub async fn product_count(&self) -> usize {
        self.tables.read().await.products.len()
    }

    /// Returns the number of outbox rows.
    pub async fn outbox_count(&self) -> usize {
        self.tables.read().await.outbox.len()
    }

    /// Returns every outbox row in insertion order.
    pub async fn outbox_events(&self) -> Vec<OutboxRow> {
        self.tables.read().await.outbox.clone()
    }

    /// Clears all rows.
    pub async fn clear(&self) {
        let mut tables = self.tables.write().await;
        tables.products.clear();
        tables.outbox.clear();
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn get_product(&self, id: &ProductId) -> Result<Option<ProductRow>> {
        Ok(self.tables.read().await.products.get(id).cloned())
    }

    async fn query_products(&self, query: &ProductQuery) -> Result<ProductPage> {
        let tables = self.tables.read().await;
        let mut rows: Vec<_> = tables.matching(query).cloned().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        let total_count = rows.len() as u64;
        let rows = rows
            .into_iter()
            .skip(query.offset)
            .take(query.limit.unwrap_or(usize::MAX))
            .collect();

        Ok(ProductPage { rows, total_count })
    }

    async fn count_products(&self, query: &ProductQuery) -> Result<u64> {
        Ok(self.tables.read().await.matching(query).count() as u64)
    }

    async fn apply(&self, mutations: Vec<Mutation>) -> Result<()> {
        let mut tables = self.tables.write().await;
        let mut staged = tables.clone();
        let count = mutations.len();
        for mutation in mutations {
            staged.apply(mutation)?;
        }
        *tables = staged;
        tracing::debug!(mutations = count, "applied batch");
        Ok(())
    }

    async fn outbox_events_for(&self, aggregate_id: &str) -> Result<Vec<OutboxRow>> {
        let tables = self.tables.read().await;
        Ok(tables
            .outbox
            .iter()
            .filter(|e| e.aggregate_id == aggregate_id)
            .cloned()
            .collect())
    }

    fn stream_outbox(&self, status: OutboxStatus) -> OutboxStream<'_> {
        let tables = self.tables.clone();
        stream::once(async move {
            let tables = tables.read().await;
            tables
                .outbox
                .iter()
                .filter(|e| e.status == status)
                .cloned()
                .map(Ok)
                .collect::<Vec<_>>()
        })
        .flat_map(stream::iter)
        .boxed()
    }
}
