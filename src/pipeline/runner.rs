use tracing::{debug, info, warn};

use crate::models::ProductRevenueSummary;
use crate::pipeline::{Extractor, PipelineConfig, PipelineError, TransformReport, Transformed, Transformer};
use crate::storage::{LoadError, SqliteStore, SummaryStore};

/// What a completed run did at each stage.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub extracted_rows: usize,
    pub transform: TransformReport,
    pub loaded_rows: usize,
    /// The rows as computed, with the scale of their input amounts.
    pub summaries: Vec<ProductRevenueSummary>,
    /// The table contents read back after the load.
    pub verification: Vec<ProductRevenueSummary>
}

/// Runs extract, transform and load in sequence against a summary store.
pub struct Pipeline<S: SummaryStore> {
    config: PipelineConfig,
    store: S
}

impl Pipeline<SqliteStore> {
    /// Creates a pipeline writing to the SQLite database named by `config`.
    pub fn from_config(config: PipelineConfig) -> Self {
        let store = SqliteStore::new(config.output_location.clone());
        Self::new(config, store)
    }
}

impl<S: SummaryStore> Pipeline<S> {
    pub fn new(config: PipelineConfig, store: S) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Executes one full run. The first failing stage ends the run.
    pub fn run(&self) -> Result<RunReport, PipelineError> {
        let config = &self.config;

        info!("Extract: reading records from [{}]", config.input_path.display());
        let records = Extractor::extract(&config.input_path)?;
        let extracted_rows = records.len();
        info!("Extract: read {extracted_rows} records");

        info!("Transform: cleaning and aggregating records");
        let Transformed { summaries, report } = Transformer::transform(records)?;
        log_transform_report(&report);

        info!("Load: replacing table [{}] in [{}]", config.table_name, config.output_location.display());
        let loaded_rows = self.store.replace(&config.table_name, &summaries)?;
        info!("Load: wrote {loaded_rows} records into table [{}]", config.table_name);

        let verification = self.store.read(&config.table_name)?;

        if verification != summaries {
            return Err(LoadError::verification_mismatch(&config.table_name, summaries.len(), verification.len()).into());
        }

        Ok(RunReport {
            extracted_rows,
            transform: report,
            loaded_rows,
            summaries,
            verification
        })
    }
}

fn log_transform_report(report: &TransformReport) {
    debug!("Transform: received {} records", report.input_rows);
    info!("Transform: dropped {} rows with missing values", report.dropped_missing_values);
    info!("Transform: dropped {} rows with zero or negative amounts", report.dropped_non_positive_amounts);

    if report.products == 0 {
        warn!("Transform: no records survived filtering, the summary is empty");
    } else {
        info!("Transform: {} clean records across {} unique products", report.clean_rows, report.products);
    }

    if let Some((first, last)) = report.date_range {
        info!("Transform: clean records span {first} to {last}");
    }
}
