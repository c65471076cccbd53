use std::path::PathBuf;

/// Input table read by the pipeline, relative to the working directory.
pub const INPUT_FILE: &str = "claims_raw.csv";
/// Summary table written by the pipeline.
pub const OUTPUT_FILE: &str = "claims_summary.csv";

/// The only `claim_status` that survives filtering. Matched exactly.
pub const PAID_STATUS: &str = "Paid";
/// Claims strictly above this cost are flagged as high-cost.
pub const HIGH_COST_THRESHOLD: f64 = 100.0;

// lowercase column names referenced after normalization
pub const CLAIM_ID: &str = "claim_id";
pub const CLAIM_DATE: &str = "claim_date";
pub const CLAIM_STATUS: &str = "claim_status";
pub const DRUG_CODE: &str = "drug_code";
pub const CLAIM_COST: &str = "claim_cost";
pub const CLAIM_MONTH: &str = "claim_month";
pub const HIGH_COST_FLAG: &str = "high_cost_flag";

pub const REQUIRED_COLUMNS: [&str; 5] = [CLAIM_ID, CLAIM_DATE, CLAIM_STATUS, DRUG_CODE, CLAIM_COST];

pub const SUMMARY_HEADER: [&str; 6] = [
    CLAIM_MONTH,
    DRUG_CODE,
    "total_claims",
    "total_cost",
    "avg_cost",
    "high_cost_count",
];

/// Where to read claims from and where to put the summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl PipelineConfig {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(INPUT_FILE, OUTPUT_FILE)
    }
}
