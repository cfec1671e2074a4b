//! Catalog queries over the stored product rows.

use common::{ProductId, SharedClock};
use domain::ProductStatus;
use store::{CatalogStore, ProductQuery};

use crate::error::{ProjectionError, Result};
use crate::pagination::{Pagination, ProductListFilter, ProductPage};
use crate::view::ProductView;

/// Read-side entry point for product lookups.
///
/// Holds its own clock so read-time pricing does not depend on the write
/// side's notion of now.
#[derive(Clone)]
pub struct ProductQueries<S> {
    store: S,
    clock: SharedClock,
}

impl<S: CatalogStore> ProductQueries<S> {
    pub fn new(store: S, clock: SharedClock) -> Self {
        Self { store, clock }
    }

    /// Looks up one product by id, archived ones included.
    #[tracing::instrument(skip(self))]
    pub async fn get_product(&self, id: &ProductId) -> Result<ProductView> {
        let row = self
            .store
            .get_product(id)
            .await?
            .ok_or_else(|| ProjectionError::NotFound(id.clone()))?;
        ProductView::from_row(row, self.clock.now())
    }

    /// Lists products matching `filter`, newest first.
    #[tracing::instrument(skip(self))]
    pub async fn list_products(
        &self,
        filter: &ProductListFilter,
        pagination: Pagination,
    ) -> Result<ProductPage> {
        let mut query = ProductQuery::new()
            .limit(pagination.effective_limit())
            .offset(pagination.offset);
        if let Some(category) = filter.effective_category() {
            query = query.category(category);
        }
        if let Some(status) = filter.effective_status() {
            query = query.status(status.as_str());
        }
        if filter.excludes_archived() {
            query = query.exclude_status(ProductStatus::Archived.as_str());
        }

        let page = self.store.query_products(&query).await?;
        let now = self.clock.now();
        let products = page
            .rows
            .into_iter()
            .map(|row| ProductView::from_row(row, now))
            .collect::<Result<Vec<_>>>()?;

        metrics::counter!("catalog_list_queries_total").increment(1);
        tracing::debug!(
            returned = products.len(),
            total = page.total_count,
            "listed products"
        );
        Ok(ProductPage::new(products, page.total_count, pagination.offset))
    }

    /// Counts non-archived products in `category`.
    #[tracing::instrument(skip(self))]
    pub async fn count_by_category(&self, category: &str) -> Result<u64> {
        let query = ProductQuery::new()
            .category(category)
            .exclude_status(ProductStatus::Archived.as_str());
        Ok(self.store.count_products(&query).await?)
    }
}
