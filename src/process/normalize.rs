use arrow::{
    datatypes::{Field, Schema},
    error::ArrowError,
    record_batch::RecordBatch,
};
use std::sync::Arc;

/// Lowercase every column name. Row content is untouched.
pub fn lowercase_columns(batch: &RecordBatch) -> Result<RecordBatch, ArrowError> {
    let schema = batch.schema();
    let fields: Vec<Field> = schema
        .fields()
        .iter()
        .map(|f| f.as_ref().clone().with_name(f.name().to_lowercase()))
        .collect();
    let renamed = Schema::new_with_metadata(fields, schema.metadata().clone());

    RecordBatch::try_new(Arc::new(renamed), batch.columns().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use arrow::array::{ArrayRef, StringArray};

    #[test]
    fn lowercases_names_and_keeps_data() -> Result<()> {
        let batch = RecordBatch::try_from_iter(vec![
            ("Claim_ID", Arc::new(StringArray::from(vec!["C1", "C2"])) as ArrayRef),
            ("DRUG_CODE", Arc::new(StringArray::from(vec!["D1", "D2"])) as ArrayRef),
        ])?;
        let out = lowercase_columns(&batch)?;

        let names: Vec<&str> = out
            .schema_ref()
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect();
        assert_eq!(names, vec!["claim_id", "drug_code"]);
        assert_eq!(out.columns(), batch.columns());
        Ok(())
    }
}
