use arrow::error::ArrowError;
use std::path::PathBuf;
use thiserror::Error;

/// Anything that stops the claims table from being read into memory.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed claims table: {0}")]
    Arrow(#[from] ArrowError),

    #[error("required column `{0}` not found in header")]
    MissingColumn(&'static str),

    /// `row` is the 1-based data row, header excluded.
    #[error("row {row}: cannot parse claim_date {value:?}")]
    InvalidDate { row: usize, value: String },

    #[error("row {row}: cannot parse claim_cost {value:?}")]
    InvalidCost { row: usize, value: String },
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize summary: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("load failed: {0}")]
    Load(#[from] LoadError),

    #[error("transform failed: {0}")]
    Transform(#[from] ArrowError),

    #[error("write failed: {0}")]
    Write(#[from] WriteError),
}
