//! Batch persistence into a single table
//!
//! Both entry points follow the same lifecycle: check the catalog, create the
//! table if it is absent, clear it according to the [`RefreshMode`], then
//! insert every row as its own statement. There is no transaction, so a
//! failure partway through leaves the rows inserted so far.

use crate::model::{Record, Row};
use crate::storage::schema::{infer_schema, validate_identifier, TableSchema};
use crate::storage::traits::{Storage, StorageError, StorageResult};
use crate::storage::RefreshMode;

/// Saves untyped rows, inferring the table schema from the first row
///
/// `keys` name the identifying columns; they must appear in the first row but
/// carry no uniqueness or upsert semantics.
///
/// # Returns
///
/// The number of rows inserted
pub fn save_rows<S: Storage + ?Sized>(
    storage: &mut S,
    keys: &[&str],
    rows: &[Row],
    table: &str,
    refresh: RefreshMode,
) -> StorageResult<usize> {
    validate_identifier(table)?;

    let first = rows
        .first()
        .ok_or_else(|| StorageError::EmptyBatch(table.to_string()))?;

    if let Some(missing) = keys.iter().find(|key| first.get(key).is_none()) {
        return Err(StorageError::MissingKeyColumn(missing.to_string()));
    }

    if storage.table_exists(table)? {
        prepare_existing(storage, table, refresh)?;
    } else {
        let schema = infer_schema(first)?;
        create_fresh(storage, table, &schema)?;
    }

    for row in rows {
        storage.insert_row(table, row)?;
    }

    tracing::info!("Saved {} rows to table '{}'", rows.len(), table);
    Ok(rows.len())
}

/// Saves typed records using the schema their type declares
///
/// Every row is checked against the declared schema before it is inserted.
///
/// # Returns
///
/// The number of rows inserted
pub fn save_records<R: Record, S: Storage + ?Sized>(
    storage: &mut S,
    records: &[R],
    table: &str,
    refresh: RefreshMode,
) -> StorageResult<usize> {
    validate_identifier(table)?;
    let schema = R::schema();

    if storage.table_exists(table)? {
        prepare_existing(storage, table, refresh)?;
    } else {
        create_fresh(storage, table, &schema)?;
    }

    for record in records {
        let row = record.to_row();
        schema.check_row(table, &row)?;
        storage.insert_row(table, &row)?;
    }

    tracing::info!("Saved {} records to table '{}'", records.len(), table);
    Ok(records.len())
}

fn create_fresh<S: Storage + ?Sized>(
    storage: &mut S,
    table: &str,
    schema: &TableSchema,
) -> StorageResult<()> {
    tracing::info!("Creating table '{}' with {} columns", table, schema.len());
    storage.create_table(table, schema)?;
    // Always empty at this point; kept so both paths end on a clean table.
    storage.clear_table(table)?;
    Ok(())
}

fn prepare_existing<S: Storage + ?Sized>(
    storage: &mut S,
    table: &str,
    refresh: RefreshMode,
) -> StorageResult<()> {
    match refresh {
        RefreshMode::Append => {
            tracing::info!("Table '{}' exists, appending to existing rows", table);
        }
        RefreshMode::Replace => {
            let removed = storage.clear_table(table)?;
            tracing::info!("Cleared {} rows from existing table '{}'", removed, table);
        }
    }
    Ok(())
}
