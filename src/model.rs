//! Crawled record model
//!
//! [`Animal`] is the in-memory shape of one listing. Before storage each record
//! is flattened into a [`Row`], an ordered column/value mapping whose values are
//! SQLite scalars.

use crate::storage::{ColumnType, TableSchema};
use rusqlite::types::Value;

/// Column names used for the animal table
pub const URL_COLUMN: &str = "URL";
pub const NAME_COLUMN: &str = "Name";
pub const BREED_COLUMN: &str = "Breed";

/// One crawled listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Animal {
    /// Absolute URL of the detail page, used as the natural identifier
    pub address: String,

    /// Display name from the listing card (may be empty)
    pub name: String,

    /// Breed from the detail page, empty until enriched
    pub breed: String,
}

impl Animal {
    /// Creates a partial record as extracted from a listing page
    pub fn new(address: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: name.into(),
            breed: String::new(),
        }
    }
}

/// A record type that knows its own table layout
///
/// Implementors declare their columns once, so the storage layer never has to
/// guess a schema from the first row it sees.
pub trait Record {
    /// The declared column layout
    fn schema() -> TableSchema;

    /// Flattens the record into an untyped row
    fn to_row(&self) -> Row;
}

impl Record for Animal {
    fn schema() -> TableSchema {
        TableSchema::new(vec![
            (URL_COLUMN.to_string(), ColumnType::Text),
            (NAME_COLUMN.to_string(), ColumnType::Text),
            (BREED_COLUMN.to_string(), ColumnType::Text),
        ])
    }

    fn to_row(&self) -> Row {
        Row::new()
            .with(URL_COLUMN, self.address.clone())
            .with(NAME_COLUMN, self.name.clone())
            .with(BREED_COLUMN, self.breed.clone())
    }
}

/// Converts a batch of records into untyped rows, one-to-one and in order
pub fn to_rows<R: Record>(records: &[R]) -> Vec<Row> {
    records.iter().map(Record::to_row).collect()
}

/// An untyped record: column names mapped to SQLite scalars
///
/// Keys are unique; setting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
