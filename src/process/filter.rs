use arrow::{
    array::StringArray,
    compute::{filter_record_batch, kernels::cmp},
    error::ArrowError,
    record_batch::RecordBatch,
};
use tracing::debug;

use crate::config::{CLAIM_STATUS, PAID_STATUS};
use crate::process::utils::typed_column;

/// Keep only rows whose `claim_status` is exactly `"Paid"`.
///
/// The comparison is case-sensitive with no trimming. Null statuses never
/// match, so those rows are dropped along with every other status.
pub fn retain_paid(claims: &RecordBatch) -> Result<RecordBatch, ArrowError> {
    let status = typed_column::<StringArray>(claims, CLAIM_STATUS)?;
    let mask = cmp::eq(status, &StringArray::new_scalar(PAID_STATUS))?;
    let kept = filter_record_batch(claims, &mask)?;

    debug!(
        kept = kept.num_rows(),
        dropped = claims.num_rows() - kept.num_rows(),
        "filtered on claim status"
    );
    Ok(kept)
}
