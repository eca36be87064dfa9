use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::models::{RawTransaction, INPUT_COLUMNS};
use crate::pipeline::{ExtractionError, PipelineError};

/// Reads a delimited input file into raw transactions.
pub struct Extractor;

impl Extractor {
    /// Returns every row of `path` in file order.
    ///
    /// Cell values are not validated here; only the file itself, its header
    /// and the integer transaction ID must be well formed.
    pub fn extract(path: &Path) -> Result<Vec<RawTransaction>, PipelineError> {
        let file = File::open(path).map_err(|error| match error.kind() {
            ErrorKind::NotFound => PipelineError::not_found(path),
            _ => ExtractionError::io(path, error).into()
        })?;

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .from_reader(BufReader::new(file));

        let headers = reader.headers().map_err(|source| ExtractionError::csv(path, source))?;
        check_headers(path, headers)?;

        let records = reader.deserialize::<RawTransaction>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| ExtractionError::csv(path, source))?;

        debug!("Extracted {} records from [{}]", records.len(), path.display());

        Ok(records)
    }
}

fn check_headers(path: &Path, headers: &StringRecord) -> Result<(), ExtractionError> {
    let missing: Vec<String> = INPUT_COLUMNS.iter()
        .filter(|column| !headers.iter().any(|header| header == **column))
        .map(|column| column.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(ExtractionError::InvalidHeader { path: path.to_path_buf(), missing });
    }

    if headers.len() > INPUT_COLUMNS.len() {
        debug!("Ignoring {} extra columns in [{}]", headers.len() - INPUT_COLUMNS.len(), path.display());
    }

    Ok(())
}
