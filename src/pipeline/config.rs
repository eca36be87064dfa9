use std::path::PathBuf;

pub const DEFAULT_INPUT_PATH: &str = "sales_data.csv";
pub const DEFAULT_OUTPUT_LOCATION: &str = "analytics_db.sqlite";
pub const DEFAULT_TABLE_NAME: &str = "product_monthly_revenue";

/// Where a pipeline run reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Delimited source file.
    pub input_path: PathBuf,
    /// SQLite database file.
    pub output_location: PathBuf,
    /// Table replaced on every run.
    pub table_name: String
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_location: PathBuf::from(DEFAULT_OUTPUT_LOCATION),
            table_name: DEFAULT_TABLE_NAME.to_string()
        }
    }
}
