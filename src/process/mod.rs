// src/process/mod.rs
use std::path::PathBuf;
use tracing::info;

use crate::config::PipelineConfig;
use crate::error::PipelineError;

pub mod aggregate;
pub mod date_parser;
pub mod derive;
pub mod filter;
pub mod load;
pub mod normalize;
pub mod utils;
pub mod write;

pub use aggregate::SummaryRow;

/// What a successful run did, for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub rows_loaded: usize,
    pub rows_paid: usize,
    pub groups_written: usize,
    pub output: PathBuf,
}

impl RunReport {
    /// The single line printed to stdout after a successful run.
    pub fn completion_line(&self) -> String {
        format!(
            "ETL pipeline executed successfully. Output saved to {}.",
            self.output.display()
        )
    }
}

/// Run the whole claims pipeline: load → filter → normalize → derive →
/// aggregate → write.
///
/// Each step takes the complete table from the one before. Any failure
/// aborts the run; nothing is retried.
#[tracing::instrument(
    level = "info",
    skip(config),
    fields(input = %config.input.display(), output = %config.output.display())
)]
pub fn run(config: &PipelineConfig) -> Result<RunReport, PipelineError> {
    // 1) load
    let claims = load::load_claims(&config.input)?;
    info!(rows = claims.num_rows(), "loaded claims");

    // 2) paid only
    let paid = filter::retain_paid(&claims)?;
    info!(rows = paid.num_rows(), "kept paid claims");

    // 3) lowercase column names
    let paid = normalize::lowercase_columns(&paid)?;

    // 4) claim_month + high_cost_flag
    let annotated = derive::derive_fields(&paid)?;

    // 5) group by (month, drug)
    let summary = aggregate::summarize(&annotated)?;
    info!(groups = summary.len(), "aggregated");

    // 6) write
    write::write_summary(&config.output, &summary)?;

    Ok(RunReport {
        rows_loaded: claims.num_rows(),
        rows_paid: paid.num_rows(),
        groups_written: summary.len(),
        output: config.output.clone(),
    })
}
