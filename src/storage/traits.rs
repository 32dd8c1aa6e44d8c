//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::model::Row;
use crate::storage::schema::TableSchema;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Cannot infer a column type for '{column}' from a {kind} value")]
    UnsupportedType { column: String, kind: String },

    #[error("Cannot infer a schema from an empty batch for table '{0}'")]
    EmptyBatch(String),

    #[error("Cannot create table '{0}' without columns")]
    EmptySchema(String),

    #[error("Row does not match the schema of '{table}' at column '{column}'")]
    SchemaMismatch { table: String, column: String },

    #[error("Key column '{0}' is not present in the records")]
    MissingKeyColumn(String),

    #[error("Invalid table name: '{0}'")]
    InvalidIdentifier(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
///
/// The sink functions in this module only talk to storage through this trait,
/// so the table lifecycle can be exercised against any backend.
pub trait Storage {
    /// Checks the catalog for a table with the given name
    fn table_exists(&self, table: &str) -> StorageResult<bool>;

    /// Creates a table with the given column layout
    fn create_table(&mut self, table: &str, schema: &TableSchema) -> StorageResult<()>;

    /// Deletes every row of a table, returning how many were removed
    fn clear_table(&mut self, table: &str) -> StorageResult<u64>;

    /// Inserts one row as its own statement
    fn insert_row(&mut self, table: &str, row: &Row) -> StorageResult<()>;

    /// Counts the rows in a table
    fn count_rows(&self, table: &str) -> StorageResult<u64>;

    /// Lists a table's column names in declaration order
    fn table_columns(&self, table: &str) -> StorageResult<Vec<String>>;
}
