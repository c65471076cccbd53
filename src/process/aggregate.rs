use arrow::{
    array::{Array, BooleanArray, Float64Array, StringArray},
    error::ArrowError,
    record_batch::RecordBatch,
};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::config::{CLAIM_COST, CLAIM_MONTH, DRUG_CODE, HIGH_COST_FLAG};
use crate::process::utils::typed_column;

/// One output row: totals for a single (month, drug) pair.
///
/// Field order is the column order of the written summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub claim_month: String,
    pub drug_code: String,
    pub total_claims: u64,
    pub total_cost: f64,
    pub avg_cost: f64,
    pub high_cost_count: u64,
}

#[derive(Debug, Default)]
struct Totals {
    claims: u64,
    cost: f64,
    high_cost: u64,
}

impl Totals {
    fn add(&mut self, cost: f64, high_cost: bool) {
        self.claims += 1;
        self.cost += cost;
        if high_cost {
            self.high_cost += 1;
        }
    }

    fn into_row(self, claim_month: String, drug_code: String) -> SummaryRow {
        SummaryRow {
            claim_month,
            drug_code,
            total_claims: self.claims,
            total_cost: self.cost,
            // every group has at least one claim
            avg_cost: self.cost / self.claims as f64,
            high_cost_count: self.high_cost,
        }
    }
}

/// Group annotated claims by (`claim_month`, `drug_code`).
///
/// Groups come back sorted by month, then drug code. Rows without a drug
/// code belong to no group.
pub fn summarize(claims: &RecordBatch) -> Result<Vec<SummaryRow>, ArrowError> {
    let months = typed_column::<StringArray>(claims, CLAIM_MONTH)?;
    let drugs = typed_column::<StringArray>(claims, DRUG_CODE)?;
    let costs = typed_column::<Float64Array>(claims, CLAIM_COST)?;
    let flags = typed_column::<BooleanArray>(claims, HIGH_COST_FLAG)?;

    let mut groups: BTreeMap<(String, String), Totals> = BTreeMap::new();
    let mut ungrouped = 0usize;

    for i in 0..claims.num_rows() {
        if months.is_null(i) || drugs.is_null(i) || drugs.value(i).is_empty() {
            ungrouped += 1;
            continue;
        }
        let key = (months.value(i).to_string(), drugs.value(i).to_string());
        groups
            .entry(key)
            .or_default()
            .add(costs.value(i), flags.value(i));
    }

    if ungrouped > 0 {
        debug!(ungrouped, "rows without a drug code left out of the summary");
    }

    Ok(groups
        .into_iter()
        .map(|((month, drug), totals)| totals.into_row(month, drug))
        .collect())
}
