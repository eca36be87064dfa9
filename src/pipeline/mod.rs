mod config;
mod errors;
mod extractor;
mod runner;
mod sample;
mod transformer;

pub use config::PipelineConfig;
pub use errors::{ExtractionError, PipelineError};
pub use extractor::Extractor;
pub use runner::{Pipeline, RunReport};
pub use sample::write_sample_data;
pub use transformer::{TransformReport, Transformed, Transformer};
