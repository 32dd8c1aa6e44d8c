//! Storage module for persisting scraped records
//!
//! This module handles all database operations, including:
//! - SQLite database opening
//! - Schema declaration and inference
//! - Table lifecycle (existence check, creation, clearing)
//! - Row-by-row insertion

mod schema;
mod sink;
mod sqlite;
mod traits;

pub use schema::{
    create_table_sql, infer_schema, insert_sql, quote_identifier, validate_identifier, ColumnType,
    TableSchema,
};
pub use sink::{save_records, save_rows};
pub use sqlite::SqliteStorage;
pub use traits::{Storage, StorageError, StorageResult};

use serde::Deserialize;
use std::path::Path;

/// Opens or creates a storage database
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(SqliteStorage)` - Successfully opened storage
/// * `Err(StorageError)` - Failed to open storage
pub fn open_storage(path: &Path) -> StorageResult<SqliteStorage> {
    SqliteStorage::new(path)
}

/// What happens to rows already present in an existing table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshMode {
    /// Keep previous rows and add the new batch after them
    #[default]
    Append,

    /// Delete previous rows before inserting the new batch
    Replace,
}

impl RefreshMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Append => "append",
            Self::Replace => "replace",
        }
    }
}
