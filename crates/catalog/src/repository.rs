//! Mapping between the product aggregate and its stored row.

use common::ProductId;
use domain::{Discount, Field, Money, Product, ProductStatus, TrackedProduct};
use store::{CatalogStore, DiscountColumns, Mutation, ProductColumn, ProductRow, ProductUpdate};

use crate::error::{CatalogError, Result};

/// Loads products and turns tracked changes into store mutations.
#[derive(Clone)]
pub struct ProductRepository<S> {
    store: S,
}

impl<S: CatalogStore> ProductRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads a product as a clean, non-new tracked aggregate.
    pub async fn get(&self, id: &ProductId) -> Result<TrackedProduct> {
        let row = self
            .store
            .get_product(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
        Ok(TrackedProduct::loaded(product_from_row(row)?))
    }

    /// The mutation persisting `tracked`, or `None` when nothing changed.
    pub fn mutation(&self, tracked: &TrackedProduct) -> Result<Option<Mutation>> {
        product_mutation(tracked)
    }
}

/// Converts a product into the full row used for inserts.
pub fn product_to_row(product: &Product) -> Result<ProductRow> {
    let (price_num, price_denom) = price_parts(product)?;
    Ok(ProductRow {
        id: product.id().clone(),
        name: product.name().to_string(),
        description: product.description().to_string(),
        category: product.category().to_string(),
        price_num,
        price_denom,
        discount: product.discount().map(discount_columns),
        status: product.status().as_str().to_string(),
        created_at: product.created_at(),
        updated_at: product.updated_at(),
        archived_at: product.archived_at(),
    })
}

/// Rebuilds a product from a stored row.
pub fn product_from_row(row: ProductRow) -> Result<Product> {
    let invalid = |reason: String| CatalogError::InvalidRow {
        product_id: row.id.clone(),
        reason,
    };

    let base_price =
        Money::new(row.price_num, row.price_denom).map_err(|e| invalid(e.to_string()))?;
    let status = row
        .status
        .parse::<ProductStatus>()
        .map_err(|e| invalid(e.to_string()))?;
    let discount = row
        .discount
        .map(|d| Discount::new(d.percentage, d.start, d.end))
        .transpose()
        .map_err(|e| invalid(e.to_string()))?;

    Ok(Product::reconstitute(
        row.id,
        row.name,
        row.description,
        row.category,
        base_price,
        discount,
        status,
        row.created_at,
        row.updated_at,
        row.archived_at,
    ))
}

/// Maps a tracked product to the mutation that persists it.
///
/// New products become an insert of the whole row. Loaded products become an
/// update of their dirty fields plus `updated_at`, or `None` when clean.
pub fn product_mutation(tracked: &TrackedProduct) -> Result<Option<Mutation>> {
    let product = tracked.product();
    if tracked.is_new() {
        return Ok(Some(Mutation::InsertProduct(product_to_row(product)?)));
    }

    if !tracked.changes().has_changes() {
        return Ok(None);
    }

    let mut columns = Vec::new();
    for field in tracked.changes().dirty_fields() {
        columns.push(match field {
            Field::Name => ProductColumn::Name(product.name().to_string()),
            Field::Description => ProductColumn::Description(product.description().to_string()),
            Field::Category => ProductColumn::Category(product.category().to_string()),
            Field::BasePrice => {
                let (numerator, denominator) = price_parts(product)?;
                ProductColumn::Price {
                    numerator,
                    denominator,
                }
            }
            Field::Discount => ProductColumn::Discount(product.discount().map(discount_columns)),
            Field::Status => ProductColumn::Status(product.status().as_str().to_string()),
            Field::ArchivedAt => ProductColumn::ArchivedAt(product.archived_at()),
        });
    }
    columns.push(ProductColumn::UpdatedAt(product.updated_at()));

    Ok(ProductUpdate::new(product.id().clone(), columns).map(Mutation::UpdateProduct))
}

fn price_parts(product: &Product) -> Result<(i64, i64)> {
    product
        .base_price()
        .to_i64_parts()
        .ok_or_else(|| CatalogError::PriceOutOfRange(product.id().clone()))
}

fn discount_columns(discount: &Discount) -> DiscountColumns {
    DiscountColumns {
        percentage: i64::from(discount.percentage()),
        start: discount.start(),
        end: discount.end(),
    }
}
