use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::CoercionError;
use crate::storage::LoadError;

/// Every failure that halts a pipeline run, tagged with the stage it came from.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Extract stage failed: input file [{}] was not found", path.display())]
    NotFound {
        path: PathBuf
    },
    #[error("Extract stage failed: {0}")]
    Extraction(#[from] ExtractionError),
    #[error("Transform stage failed: {0}")]
    Coercion(#[from] CoercionError),
    #[error("Load stage failed: {0}")]
    Load(#[from] LoadError)
}

impl PipelineError {
    pub fn not_found(path: &Path) -> Self {
        Self::NotFound { path: path.to_path_buf() }
    }
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Input file [{}] could not be opened: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error
    },
    #[error("Input file [{}] is missing required columns [{}]", path.display(), missing.join(", "))]
    InvalidHeader {
        path: PathBuf,
        missing: Vec<String>
    },
    #[error("Input file [{}] could not be parsed: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error
    }
}

impl ExtractionError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io { path: path.to_path_buf(), source }
    }

    pub fn csv(path: &Path, source: csv::Error) -> Self {
        Self::Csv { path: path.to_path_buf(), source }
    }
}
