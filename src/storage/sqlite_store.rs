use std::fs::create_dir_all;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OpenFlags};
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::ProductRevenueSummary;
use crate::storage::{LoadError, SummaryStore};

/// SQLite-backed summary store.
///
/// Every call opens its own connection and closes it before returning, on
/// success and failure alike.
pub struct SqliteStore {
    location: PathBuf
}

impl SqliteStore {
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into()
        }
    }

    fn open_for_write(&self, table_name: &str) -> Result<Connection, LoadError> {
        if let Some(parent) = self.location.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            create_dir_all(parent).map_err(|source| LoadError::Io {
                location: self.location.clone(),
                source
            })?;
        }

        Connection::open(&self.location)
            .map_err(|source| LoadError::sqlite(&self.location, table_name, source))
    }

    fn open_for_read(&self, table_name: &str) -> Result<Connection, LoadError> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        Connection::open_with_flags(&self.location, flags)
            .map_err(|source| LoadError::sqlite(&self.location, table_name, source))
    }
}

impl SummaryStore for SqliteStore {
    fn replace(&self, table_name: &str, rows: &[ProductRevenueSummary]) -> Result<usize, LoadError> {
        let table = quote_table_name(table_name)?;
        let sqlite_error = |source: rusqlite::Error| LoadError::sqlite(&self.location, table_name, source);

        let mut connection = self.open_for_write(table_name)?;

        //NOTE: Dropping the transaction without commit rolls back, so the DROP below is only visible once every insert succeeded
        let transaction = connection.transaction().map_err(sqlite_error)?;

        transaction.execute_batch(&format!(
            r#"
            DROP TABLE IF EXISTS {table};
            CREATE TABLE {table} (
                product_id        TEXT PRIMARY KEY,
                total_revenue_usd NUMERIC NOT NULL,
                processed_at      TEXT NOT NULL
            );
            "#
        )).map_err(sqlite_error)?;

        {
            //NOTE: NUMERIC affinity stores the decimal string as INTEGER or REAL whenever that conversion is lossless, and keeps it as TEXT otherwise
            let mut statement = transaction
                .prepare(&format!("INSERT INTO {table} (product_id, total_revenue_usd, processed_at) VALUES (?1, ?2, ?3)"))
                .map_err(sqlite_error)?;

            for row in rows {
                statement
                    .execute(params![row.product_id, row.total_revenue_usd.to_string(), row.processed_at])
                    .map_err(sqlite_error)?;
            }
        }

        transaction.commit().map_err(sqlite_error)?;

        debug!("Replaced table [{table_name}] in [{}] with {} rows", self.location.display(), rows.len());

        Ok(rows.len())
    }

    fn read(&self, table_name: &str) -> Result<Vec<ProductRevenueSummary>, LoadError> {
        let table = quote_table_name(table_name)?;
        let sqlite_error = |source: rusqlite::Error| LoadError::sqlite(&self.location, table_name, source);

        let connection = self.open_for_read(table_name)?;
        let mut statement = connection
            .prepare(&format!("SELECT product_id, total_revenue_usd, processed_at FROM {table} ORDER BY rowid"))
            .map_err(sqlite_error)?;

        let rows = statement
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, numeric_text(row.get_ref(1)?), row.get::<_, DateTime<Utc>>(2)?))
            })
            .map_err(sqlite_error)?;

        let mut summaries = Vec::new();

        for row in rows {
            let (product_id, total_revenue_usd, processed_at) = row.map_err(sqlite_error)?;
            let total_revenue_usd = total_revenue_usd.as_deref()
                .and_then(|value| Decimal::from_str(value).ok())
                .ok_or_else(|| {
                    LoadError::corrupt_value(table_name, "total_revenue_usd", total_revenue_usd.as_deref().unwrap_or("NULL"))
                })?;

            summaries.push(ProductRevenueSummary {
                product_id,
                total_revenue_usd,
                processed_at
            });
        }

        Ok(summaries)
    }
}

/// Renders a stored numeric cell as decimal text.
///
/// Reals use the shortest representation that round-trips, which recovers the
/// decimal SQLite converted from for values of up to 15 significant digits.
fn numeric_text(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Integer(integer) => Some(integer.to_string()),
        ValueRef::Real(real) => Some(real.to_string()),
        ValueRef::Text(text) => std::str::from_utf8(text).ok().map(str::to_string),
        ValueRef::Null | ValueRef::Blob(_) => None
    }
}

/// Validates `table_name` as a plain SQL identifier and returns it quoted.
fn quote_table_name(table_name: &str) -> Result<String, LoadError> {
    let mut characters = table_name.chars();

    let is_valid = characters.next().is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && characters.all(|character| character.is_ascii_alphanumeric() || character == '_');

    if !is_valid {
        return Err(LoadError::invalid_table_name(table_name));
    }

    Ok(format!("\"{table_name}\""))
}
