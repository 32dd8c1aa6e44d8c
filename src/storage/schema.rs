//! Table schema definitions and inference
//!
//! A schema is an ordered list of columns, each typed as one of SQLite's
//! `TEXT`, `INTEGER` or `REAL` storage classes.

use crate::model::Row;
use crate::storage::traits::{StorageError, StorageResult};
use rusqlite::types::Value;
use std::fmt;

/// Column affinity for a stored scalar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Text,
    Integer,
    Real,
}

impl ColumnType {
    pub fn to_sql(&self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Integer => "INTEGER",
            Self::Real => "REAL",
        }
    }

    /// Maps a runtime scalar to its column type
    ///
    /// Returns None for `NULL` and `BLOB`, which have no column type here.
    pub fn of_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(_) => Some(Self::Text),
            Value::Integer(_) => Some(Self::Integer),
            Value::Real(_) => Some(Self::Real),
            Value::Null | Value::Blob(_) => None,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_sql())
    }
}

/// Ordered column layout of one table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSchema {
    columns: Vec<(String, ColumnType)>,
}

impl TableSchema {
    pub fn new(columns: Vec<(String, ColumnType)>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, ColumnType)> {
        self.columns.iter().map(|(name, ty)| (name.as_str(), *ty))
    }

    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, ty)| *ty)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Checks that a row has exactly this schema's columns with matching types
    pub fn check_row(&self, table: &str, row: &Row) -> StorageResult<()> {
        for (column, value) in row.iter() {
            match self.column_type(column) {
                Some(expected) if ColumnType::of_value(value) == Some(expected) => {}
                _ => {
                    return Err(StorageError::SchemaMismatch {
                        table: table.to_string(),
                        column: column.to_string(),
                    })
                }
            }
        }

        for (column, _) in self.columns() {
            if row.get(column).is_none() {
                return Err(StorageError::SchemaMismatch {
                    table: table.to_string(),
                    column: column.to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Infers a schema from the keys and scalar types of a single sample row
///
/// Fails on the first `NULL` or `BLOB` value; there is no per-column fallback.
pub fn infer_schema(sample: &Row) -> StorageResult<TableSchema> {
    let mut columns = Vec::with_capacity(sample.len());

    for (column, value) in sample.iter() {
        let ty = ColumnType::of_value(value).ok_or_else(|| StorageError::UnsupportedType {
            column: column.to_string(),
            kind: value.data_type().to_string(),
        })?;
        columns.push((column.to_string(), ty));
    }

    Ok(TableSchema::new(columns))
}

/// Quotes an SQL identifier, doubling any embedded quote characters
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Ensures a table name is a plain identifier
///
/// Accepts ASCII letters, digits and underscores, not starting with a digit.
pub fn validate_identifier(name: &str) -> StorageResult<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidIdentifier(name.to_string()))
    }
}

/// Builds the `CREATE TABLE` statement for a schema
pub fn create_table_sql(table: &str, schema: &TableSchema) -> String {
    let columns: Vec<String> = schema
        .columns()
        .map(|(name, ty)| format!("{} {}", quote_identifier(name), ty))
        .collect();

    format!(
        "CREATE TABLE {} ({})",
        quote_identifier(table),
        columns.join(", ")
    )
}

/// Builds a parameterised `INSERT` statement naming exactly the row's keys
pub fn insert_sql(table: &str, row: &Row) -> String {
    if row.is_empty() {
        return format!("INSERT INTO {} DEFAULT VALUES", quote_identifier(table));
    }

    let columns: Vec<String> = row.keys().map(quote_identifier).collect();
    let placeholders: Vec<String> = (1..=row.len()).map(|i| format!("?{}", i)).collect();

    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_identifier(table),
        columns.join(", "),
        placeholders.join(", ")
    )
}
