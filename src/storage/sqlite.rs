//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the Storage trait.

use crate::model::Row;
use crate::storage::schema::{create_table_sql, insert_sql, quote_identifier, TableSchema};
use crate::storage::traits::{Storage, StorageError, StorageResult};
use rusqlite::{params, params_from_iter, Connection};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens or creates the database file at `path`
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        tracing::debug!("Opened database {}", path.display());

        Ok(Self { conn })
    }

    /// Creates an in-memory database
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }
}

impl Storage for SqliteStorage {
    fn table_exists(&self, table: &str) -> StorageResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT count(name) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            params![table],
            |row| row.get(0),
        )?;
        Ok(count == 1)
    }

    fn create_table(&mut self, table: &str, schema: &TableSchema) -> StorageResult<()> {
        if schema.is_empty() {
            return Err(StorageError::EmptySchema(table.to_string()));
        }

        let sql = create_table_sql(table, schema);
        tracing::debug!("{}", sql);
        self.conn.execute(&sql, [])?;
        Ok(())
    }

    fn clear_table(&mut self, table: &str) -> StorageResult<u64> {
        let removed = self
            .conn
            .execute(&format!("DELETE FROM {}", quote_identifier(table)), [])?;
        Ok(removed as u64)
    }

    fn insert_row(&mut self, table: &str, row: &Row) -> StorageResult<()> {
        let sql = insert_sql(table, row);
        self.conn
            .execute(&sql, params_from_iter(row.iter().map(|(_, value)| value)))?;
        Ok(())
    }

    fn count_rows(&self, table: &str) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", quote_identifier(table)),
            [],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn table_columns(&self, table: &str) -> StorageResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare(&format!("PRAGMA table_info({})", quote_identifier(table)))?;

        let columns = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(columns)
    }
}
