use thiserror::Error;

/// Errors that can occur when interacting with the catalog store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An insert collided with an existing primary key.
    #[error("Duplicate key in {table}: {key}")]
    DuplicateKey { table: &'static str, key: String },

    /// An update targeted a row that does not exist.
    #[error("Row not found in {table}: {key}")]
    MissingRow { table: &'static str, key: String },

    /// A stored column held a value that cannot be decoded.
    #[error("Invalid value for column {column}: {value}")]
    InvalidColumn { column: &'static str, value: String },

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
