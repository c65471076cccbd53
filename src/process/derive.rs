use arrow::{
    array::{ArrayRef, Date32Array, Float64Array, StringArray},
    compute::kernels::cmp,
    datatypes::{DataType, Field, FieldRef, Schema},
    error::ArrowError,
    record_batch::RecordBatch,
    temporal_conversions::date32_to_datetime,
};
use std::sync::Arc;

use crate::config::{CLAIM_COST, CLAIM_DATE, CLAIM_MONTH, HIGH_COST_FLAG, HIGH_COST_THRESHOLD};
use crate::process::{date_parser::to_claim_month, utils::typed_column};

/// Append `claim_month` (`YYYY-MM`) and `high_cost_flag` (`claim_cost > 100`).
///
/// A column that already carries one of those names is replaced in place.
pub fn derive_fields(claims: &RecordBatch) -> Result<RecordBatch, ArrowError> {
    let dates = typed_column::<Date32Array>(claims, CLAIM_DATE)?;
    let months: StringArray = dates
        .iter()
        .map(|d| d.and_then(date32_to_datetime).map(|dt| to_claim_month(dt.date())))
        .collect();

    let costs = typed_column::<Float64Array>(claims, CLAIM_COST)?;
    let high_cost = cmp::gt(costs, &Float64Array::new_scalar(HIGH_COST_THRESHOLD))?;

    let mut fields: Vec<FieldRef> = claims.schema().fields().iter().cloned().collect();
    let mut columns: Vec<ArrayRef> = claims.columns().to_vec();
    upsert(
        &mut fields,
        &mut columns,
        Field::new(CLAIM_MONTH, DataType::Utf8, false),
        Arc::new(months),
    );
    upsert(
        &mut fields,
        &mut columns,
        Field::new(HIGH_COST_FLAG, DataType::Boolean, false),
        Arc::new(high_cost),
    );

    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)
}

fn upsert(fields: &mut Vec<FieldRef>, columns: &mut Vec<ArrayRef>, field: Field, column: ArrayRef) {
    match fields.iter().position(|f| f.name() == field.name()) {
        Some(i) => {
            fields[i] = Arc::new(field);
            columns[i] = column;
        }
        None => {
            fields.push(Arc::new(field));
            columns.push(column);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use arrow::array::{Array, BooleanArray};
    use chrono::NaiveDate;

    use crate::process::date_parser::days_since_epoch;

    fn day(y: i32, m: u32, d: u32) -> i32 {
        days_since_epoch(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn claims(dates: Vec<i32>, costs: Vec<f64>) -> Result<RecordBatch> {
        Ok(RecordBatch::try_from_iter(vec![
            ("claim_date", Arc::new(Date32Array::from(dates)) as ArrayRef),
            ("claim_cost", Arc::new(Float64Array::from(costs)) as ArrayRef),
        ])?)
    }

    #[test]
    fn derives_month_and_flag() -> Result<()> {
        let batch = claims(
            vec![day(2023, 1, 5), day(2023, 1, 31), day(2024, 12, 1)],
            vec![50.0, 100.0, 100.01],
        )?;
        let out = derive_fields(&batch)?;
        assert_eq!(out.num_columns(), 4);

        let months = typed_column::<StringArray>(&out, CLAIM_MONTH)?;
        let months: Vec<&str> = months.iter().flatten().collect();
        assert_eq!(months, vec!["2023-01", "2023-01", "2024-12"]);

        // strictly greater than the threshold
        let flags = typed_column::<BooleanArray>(&out, HIGH_COST_FLAG)?;
        assert_eq!(flags.null_count(), 0);
        let flags: Vec<bool> = flags.iter().flatten().collect();
        assert_eq!(flags, vec![false, false, true]);
        Ok(())
    }

    #[test]
    fn replaces_existing_month_column() -> Result<()> {
        let batch = RecordBatch::try_from_iter(vec![
            ("claim_date", Arc::new(Date32Array::from(vec![day(2023, 3, 9)])) as ArrayRef),
            ("claim_cost", Arc::new(Float64Array::from(vec![1.0])) as ArrayRef),
            ("claim_month", Arc::new(StringArray::from(vec!["stale"])) as ArrayRef),
        ])?;
        let out = derive_fields(&batch)?;
        assert_eq!(out.num_columns(), 4);
        let months = typed_column::<StringArray>(&out, CLAIM_MONTH)?;
        assert_eq!(months.value(0), "2023-03");
        Ok(())
    }

    #[test]
    fn empty_table_gets_empty_columns() -> Result<()> {
        let out = derive_fields(&claims(vec![], vec![])?)?;
        assert_eq!(out.num_rows(), 0);
        assert_eq!(out.num_columns(), 4);
        Ok(())
    }
}
