//! Persistence operations applied by the store.

use chrono::{DateTime, Utc};

use crate::{DiscountColumns, OutboxRow, ProductId, ProductRow};

/// One write against the store. A batch of these is applied atomically.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Insert a new product row. Fails if the id already exists.
    InsertProduct(ProductRow),

    /// Overwrite some columns of an existing product row.
    UpdateProduct(ProductUpdate),

    /// Append a row to the outbox.
    InsertOutboxEvent(OutboxRow),
}

impl Mutation {
    /// Returns the name of the table the mutation writes to.
    pub fn table(&self) -> &'static str {
        match self {
            Mutation::InsertProduct(_) | Mutation::UpdateProduct(_) => "products",
            Mutation::InsertOutboxEvent(_) => "outbox_events",
        }
    }
}

/// A single column assignment on a product row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductColumn {
    Name(String),
    Description(String),
    Category(String),
    Price { numerator: i64, denominator: i64 },
    Discount(Option<DiscountColumns>),
    Status(String),
    ArchivedAt(Option<DateTime<Utc>>),
    UpdatedAt(DateTime<Utc>),
}

impl ProductColumn {
    /// Physical column names written by this assignment, in bind order.
    pub fn column_names(&self) -> &'static [&'static str] {
        match self {
            ProductColumn::Name(_) => &["name"],
            ProductColumn::Description(_) => &["description"],
            ProductColumn::Category(_) => &["category"],
            ProductColumn::Price { .. } => &["price_num", "price_denom"],
            ProductColumn::Discount(_) => &["discount_pct", "discount_start", "discount_end"],
            ProductColumn::Status(_) => &["status"],
            ProductColumn::ArchivedAt(_) => &["archived_at"],
            ProductColumn::UpdatedAt(_) => &["updated_at"],
        }
    }

    /// Writes this assignment into an in-memory row.
    pub fn write_to(&self, row: &mut ProductRow) {
        match self {
            ProductColumn::Name(name) => row.name = name.clone(),
            ProductColumn::Description(description) => row.description = description.clone(),
            ProductColumn::Category(category) => row.category = category.clone(),
            ProductColumn::Price {
                numerator,
                denominator,
            } => {
                row.price_num = *numerator;
                row.price_denom = *denominator;
            }
            ProductColumn::Discount(discount) => row.discount = *discount,
            ProductColumn::Status(status) => row.status = status.clone(),
            ProductColumn::ArchivedAt(archived_at) => row.archived_at = *archived_at,
            ProductColumn::UpdatedAt(updated_at) => row.updated_at = *updated_at,
        }
    }
}

/// Partial update of one product row. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductUpdate {
    id: ProductId,
    columns: Vec<ProductColumn>,
}

impl ProductUpdate {
    /// Builds an update, returning `None` when there is nothing to write.
    pub fn new(id: ProductId, columns: Vec<ProductColumn>) -> Option<Self> {
        if columns.is_empty() {
            return None;
        }
        Some(Self { id, columns })
    }

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn columns(&self) -> &[ProductColumn] {
        &self.columns
    }

    /// All physical column names touched, in bind order.
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns
            .iter()
            .flat_map(|c| c.column_names().iter().copied())
            .collect()
    }
}
