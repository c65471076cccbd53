use arrow::{datatypes::Schema, error::ArrowError, record_batch::RecordBatch};

/// Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        trimmed[1..trimmed.len() - 1].trim()
    } else {
        trimmed
    }
}

/// Parse a claim cost. Anything that isn't a finite number is rejected.
pub fn parse_cost(raw: &str) -> Option<f64> {
    clean_str(raw)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Case-insensitive lookup of `name` in a header row; first match wins.
pub fn find_column<S: AsRef<str>>(headers: &[S], name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| clean_str(h.as_ref()).eq_ignore_ascii_case(name))
}

/// Case-insensitive column lookup against an Arrow schema.
pub fn column_index(schema: &Schema, name: &str) -> Result<usize, ArrowError> {
    schema
        .fields()
        .iter()
        .position(|f| f.name().eq_ignore_ascii_case(name))
        .ok_or_else(|| ArrowError::SchemaError(format!("column `{}` not found", name)))
}

/// Fetch column `name` downcast to its concrete array type.
pub fn typed_column<'a, T: 'static>(batch: &'a RecordBatch, name: &str) -> Result<&'a T, ArrowError> {
    let idx = column_index(batch.schema_ref(), name)?;
    let col = batch.column(idx);
    col.as_any().downcast_ref::<T>().ok_or_else(|| {
        ArrowError::SchemaError(format!(
            "column `{}` has unexpected type {}",
            name,
            col.data_type()
        ))
    })
}
