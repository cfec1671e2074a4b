use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::StreamExt;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::{PgExecutor, PgPool, Postgres, Row};
use uuid::Uuid;

use crate::{
    DiscountColumns, EventId, Mutation, OutboxRow, OutboxStatus, ProductColumn, ProductId,
    ProductPage, ProductQuery, ProductRow, ProductUpdate, Result, StoreError,
    store::{CatalogStore, OutboxStream},
};

type PgQuery<'q> = sqlx::query::Query<'q, Postgres, PgArguments>;

const PRODUCT_COLUMNS: &str = "id, name, description, category, price_num, price_denom, \
     discount_pct, discount_start, discount_end, status, created_at, updated_at, archived_at";

const SNAPSHOT_READ: &str = "SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY";

const OUTBOX_COLUMNS: &str =
    "event_id, event_type, aggregate_id, payload, status, created_at, processed_at";

/// PostgreSQL-backed catalog store implementation.
#[derive(Clone)]
pub struct PostgresCatalogStore {
    pool: PgPool,
}

impl PostgresCatalogStore {
    /// Creates a new PostgreSQL catalog store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    fn row_to_product(row: PgRow) -> Result<ProductRow> {
        let discount = match (
            row.try_get::<Option<i64>, _>("discount_pct")?,
            row.try_get::<Option<DateTime<Utc>>, _>("discount_start")?,
            row.try_get::<Option<DateTime<Utc>>, _>("discount_end")?,
        ) {
            (Some(percentage), Some(start), Some(end)) => Some(DiscountColumns {
                percentage,
                start,
                end,
            }),
            (None, None, None) => None,
            _ => {
                return Err(StoreError::InvalidColumn {
                    column: "discount_pct",
                    value: "partially set discount columns".to_string(),
                });
            }
        };

        Ok(ProductRow {
            id: ProductId::new(row.try_get::<String, _>("id")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            category: row.try_get("category")?,
            price_num: row.try_get("price_num")?,
            price_denom: row.try_get("price_denom")?,
            discount,
            status: row.try_get("status")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            archived_at: row.try_get("archived_at")?,
        })
    }

    fn row_to_outbox(row: PgRow) -> Result<OutboxRow> {
        let status: String = row.try_get("status")?;

        Ok(OutboxRow {
            event_id: EventId::from_uuid(row.try_get::<Uuid, _>("event_id")?),
            event_type: row.try_get("event_type")?,
            aggregate_id: row.try_get("aggregate_id")?,
            payload: row.try_get("payload")?,
            status: status.parse()?,
            created_at: row.try_get("created_at")?,
            processed_at: row.try_get("processed_at")?,
        })
    }

    /// Builds the WHERE clause for a product query, returning the SQL and
    /// the number of parameters it uses.
    fn where_clause(query: &ProductQuery) -> (String, usize) {
        let mut sql = String::from(" WHERE 1=1");
        let mut param_count = 0;

        if query.category.is_some() {
            param_count += 1;
            sql.push_str(&format!(" AND category = ${param_count}"));
        }
        if query.status.is_some() {
            param_count += 1;
            sql.push_str(&format!(" AND status = ${param_count}"));
        }
        if query.exclude_status.is_some() {
            param_count += 1;
            sql.push_str(&format!(" AND status <> ${param_count}"));
        }

        (sql, param_count)
    }

    fn bind_filters<'q>(mut sqlx_query: PgQuery<'q>, query: &'q ProductQuery) -> PgQuery<'q> {
        if let Some(ref category) = query.category {
            sqlx_query = sqlx_query.bind(category.as_str());
        }
        if let Some(ref status) = query.status {
            sqlx_query = sqlx_query.bind(status.as_str());
        }
        if let Some(ref excluded) = query.exclude_status {
            sqlx_query = sqlx_query.bind(excluded.as_str());
        }
        sqlx_query
    }

    async fn count_in<'e, E>(executor: E, query: &ProductQuery) -> Result<u64>
    where
        E: PgExecutor<'e>,
    {
        let (where_sql, _) = Self::where_clause(query);
        let sql = format!("SELECT COUNT(*) AS total FROM products{where_sql}");
        let row = Self::bind_filters(sqlx::query(&sql), query)
            .fetch_one(executor)
            .await?;
        let total: i64 = row.try_get("total")?;
        Ok(total as u64)
    }

    fn update_sql(update: &ProductUpdate) -> String {
        let assignments: Vec<String> = update
            .column_names()
            .into_iter()
            .enumerate()
            .map(|(i, column)| format!("{column} = ${}", i + 1))
            .collect();
        let id_param = assignments.len() + 1;
        format!(
            "UPDATE products SET {} WHERE id = ${id_param}",
            assignments.join(", ")
        )
    }

    fn bind_column<'q>(sqlx_query: PgQuery<'q>, column: &'q ProductColumn) -> PgQuery<'q> {
        match column {
            ProductColumn::Name(value)
            | ProductColumn::Description(value)
            | ProductColumn::Category(value)
            | ProductColumn::Status(value) => sqlx_query.bind(value.as_str()),
            ProductColumn::Price {
                numerator,
                denominator,
            } => sqlx_query.bind(*numerator).bind(*denominator),
            ProductColumn::Discount(discount) => sqlx_query
                .bind(discount.map(|d| d.percentage))
                .bind(discount.map(|d| d.start))
                .bind(discount.map(|d| d.end)),
            ProductColumn::ArchivedAt(at) => sqlx_query.bind(*at),
            ProductColumn::UpdatedAt(at) => sqlx_query.bind(*at),
        }
    }
}

/// Converts a row count or offset to a SQL `BIGINT`, saturating at `i64::MAX`.
fn sql_bound(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn insert_error(err: sqlx::Error, table: &'static str, key: String) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_unique_violation()
    {
        return StoreError::DuplicateKey { table, key };
    }
    StoreError::Database(err)
}

#[async_trait]
impl CatalogStore for PostgresCatalogStore {
    async fn get_product(&self, id: &ProductId) -> Result<Option<ProductRow>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
        let row: Option<PgRow> = sqlx::query(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::row_to_product).transpose()
    }

    async fn query_products(&self, query: &ProductQuery) -> Result<ProductPage> {
        let (where_sql, mut param_count) = Self::where_clause(query);
        let mut sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products{where_sql} ORDER BY created_at DESC, id ASC"
        );
        if query.limit.is_some() {
            param_count += 1;
            sql.push_str(&format!(" LIMIT ${param_count}"));
        }
        param_count += 1;
        sql.push_str(&format!(" OFFSET ${param_count}"));

        let mut sqlx_query = Self::bind_filters(sqlx::query(&sql), query);
        if let Some(limit) = query.limit {
            sqlx_query = sqlx_query.bind(sql_bound(limit));
        }
        sqlx_query = sqlx_query.bind(sql_bound(query.offset));

        // Rows and total come from one snapshot.
        let mut tx = self.pool.begin().await?;
        sqlx::query(SNAPSHOT_READ).execute(&mut *tx).await?;
        let rows = sqlx_query.fetch_all(&mut *tx).await?;
        let total_count = Self::count_in(&mut *tx, query).await?;
        tx.commit().await?;

        let rows = rows
            .into_iter()
            .map(Self::row_to_product)
            .collect::<Result<Vec<_>>>()?;

        Ok(ProductPage { rows, total_count })
    }

    async fn count_products(&self, query: &ProductQuery) -> Result<u64> {
        Self::count_in(&self.pool, query).await
    }

    async fn apply(&self, mutations: Vec<Mutation>) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for mutation in &mutations {
            match mutation {
                Mutation::InsertProduct(row) => {
                    sqlx::query(
                        r#"
                        INSERT INTO products (id, name, description, category, price_num, price_denom,
                            discount_pct, discount_start, discount_end, status, created_at, updated_at, archived_at)
                        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
                        "#,
                    )
                    .bind(row.id.as_str())
                    .bind(&row.name)
                    .bind(&row.description)
                    .bind(&row.category)
                    .bind(row.price_num)
                    .bind(row.price_denom)
                    .bind(row.discount.map(|d| d.percentage))
                    .bind(row.discount.map(|d| d.start))
                    .bind(row.discount.map(|d| d.end))
                    .bind(&row.status)
                    .bind(row.created_at)
                    .bind(row.updated_at)
                    .bind(row.archived_at)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| insert_error(e, "products", row.id.to_string()))?;
                }
                Mutation::UpdateProduct(update) => {
                    let sql = Self::update_sql(update);
                    let mut sqlx_query = sqlx::query(&sql);
                    for column in update.columns() {
                        sqlx_query = Self::bind_column(sqlx_query, column);
                    }
                    let result = sqlx_query
                        .bind(update.id().as_str())
                        .execute(&mut *tx)
                        .await?;

                    if result.rows_affected() == 0 {
                        return Err(StoreError::MissingRow {
                            table: "products",
                            key: update.id().to_string(),
                        });
                    }
                }
                Mutation::InsertOutboxEvent(row) => {
                    sqlx::query(
                        r#"
                        INSERT INTO outbox_events (event_id, event_type, aggregate_id, payload, status, created_at, processed_at)
                        VALUES ($1, $2, $3, $4, $5, $6, $7)
                        "#,
                    )
                    .bind(row.event_id.as_uuid())
                    .bind(&row.event_type)
                    .bind(&row.aggregate_id)
                    .bind(&row.payload)
                    .bind(row.status.as_str())
                    .bind(row.created_at)
                    .bind(row.processed_at)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| insert_error(e, "outbox_events", row.event_id.to_string()))?;
                }
            }
        }

        tx.commit().await?;
        tracing::debug!(mutations = mutations.len(), "applied batch");
        Ok(())
    }

    async fn outbox_events_for(&self, aggregate_id: &str) -> Result<Vec<OutboxRow>> {
        let sql = format!(
            "SELECT {OUTBOX_COLUMNS} FROM outbox_events WHERE aggregate_id = $1 ORDER BY sequence ASC"
        );
        let rows = sqlx::query(&sql)
            .bind(aggregate_id)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Self::row_to_outbox).collect()
    }

    fn stream_outbox(&self, status: OutboxStatus) -> OutboxStream<'_> {
        sqlx::query(
            r#"
            SELECT event_id, event_type, aggregate_id, payload, status, created_at, processed_at
            FROM outbox_events
            WHERE status = $1
            ORDER BY sequence ASC
            "#,
        )
        .bind(status.as_str())
        .fetch(&self.pool)
        .map(|result| match result {
            Ok(row) => Self::row_to_outbox(row),
            Err(e) => Err(StoreError::Database(e)),
        })
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_bounds_saturate_instead_of_wrapping() {
        assert_eq!(sql_bound(0), 0);
        assert_eq!(sql_bound(25), 25);
        assert_eq!(sql_bound(usize::MAX), i64::MAX);
        assert!(sql_bound(usize::MAX) > 0);
    }

    #[test]
    fn where_clause_counts_parameters() {
        let query = ProductQuery::new()
            .category("Books")
            .exclude_status("archived");
        let (sql, params) = PostgresCatalogStore::where_clause(&query);
        assert_eq!(sql, " WHERE 1=1 AND category = $1 AND status <> $2");
        assert_eq!(params, 2);

        let (sql, params) = PostgresCatalogStore::where_clause(&ProductQuery::new());
        assert_eq!(sql, " WHERE 1=1");
        assert_eq!(params, 0);
    }

    #[test]
    fn update_sql_lists_every_bound_column() {
        let update = ProductUpdate::new(
            ProductId::new("p-1"),
            vec![
                ProductColumn::Status("archived".to_string()),
                ProductColumn::ArchivedAt(Some(Utc::now())),
                ProductColumn::UpdatedAt(Utc::now()),
            ],
        )
        .unwrap();
        assert_eq!(
            PostgresCatalogStore::update_sql(&update),
            "UPDATE products SET status = $1, archived_at = $2, updated_at = $3 WHERE id = $4"
        );
    }
}
