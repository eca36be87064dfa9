use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Table name [{table_name}] is not a valid identifier")]
    InvalidTableName {
        table_name: String
    },
    #[error("Store location [{}] could not be prepared: {source}", location.display())]
    Io {
        location: PathBuf,
        #[source]
        source: std::io::Error
    },
    #[error("SQLite failure on table [{table_name}] in [{}]: {source}", location.display())]
    Sqlite {
        location: PathBuf,
        table_name: String,
        #[source]
        source: rusqlite::Error
    },
    #[error("Table [{table_name}] holds an invalid {column} value [{value}]")]
    CorruptValue {
        table_name: String,
        column: &'static str,
        value: String
    },
    #[error("Verification of table [{table_name}] failed: wrote {written} rows but read back {read} rows that differ")]
    VerificationMismatch {
        table_name: String,
        written: usize,
        read: usize
    }
}

impl LoadError {
    pub fn invalid_table_name(table_name: &str) -> Self {
        Self::InvalidTableName { table_name: table_name.to_string() }
    }

    pub fn sqlite(location: &Path, table_name: &str, source: rusqlite::Error) -> Self {
        Self::Sqlite {
            location: location.to_path_buf(),
            table_name: table_name.to_string(),
            source
        }
    }

    pub fn corrupt_value(table_name: &str, column: &'static str, value: &str) -> Self {
        Self::CorruptValue {
            table_name: table_name.to_string(),
            column,
            value: value.to_string()
        }
    }

    pub fn verification_mismatch(table_name: &str, written: usize, read: usize) -> Self {
        Self::VerificationMismatch {
            table_name: table_name.to_string(),
            written,
            read
        }
    }
}
