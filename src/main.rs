mod models;
mod pipeline;
mod storage;
mod types;

use std::io::{stderr, stdout, BufWriter, Write};
use std::process::exit;
use std::time::Instant;

use anyhow::{anyhow, Result};
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::models::ProductRevenueSummary;
use crate::pipeline::{write_sample_data, Pipeline, PipelineConfig};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 2 {
        eprintln!("Usage: sales-etl-pipeline [log_level:optional] > [revenue].csv");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: info)");
        exit(1);
    }

    let log_level = args.get(1)
        .map(|s| parse_log_level(s)).unwrap_or(LevelFilter::INFO);

    setup_logging(log_level);

    let timer = Instant::now();

    if let Err(error) = run(PipelineConfig::default()) {
        error!("FATAL ERROR in pipeline execution: {error}");
        exit(1);
    }

    info!("ETL pipeline run complete in: {:?}", timer.elapsed());
}

fn run(config: PipelineConfig) -> Result<()> {
    if !config.input_path.exists() {
        info!("No input at [{}], generating sample data", config.input_path.display());

        let written = write_sample_data(&config.input_path).map_err(|error| {
            anyhow!("Sample data could not be written to [{}]: {error}", config.input_path.display())
        })?;

        info!("Generated {written} sample records");
    }

    let pipeline = Pipeline::from_config(config);
    let report = pipeline.run()?;

    info!(
        "Extracted {} records, kept {}, loaded {} and verified {} in table [{}]",
        report.extracted_rows,
        report.transform.clean_rows,
        report.loaded_rows,
        report.verification.len(),
        pipeline.config().table_name
    );

    write_results_to_stdout(&report.summaries)?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", level);
            LevelFilter::INFO
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: Stdout carries the revenue table, so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_results_to_stdout(summaries: &[ProductRevenueSummary]) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    writeln!(output, "product_id,total_revenue_usd")?;

    for summary in summaries {
        writeln!(output, "{},{}", summary.product_id, summary.total_revenue_usd)?;
    }

    output.flush()?;

    Ok(())
}
