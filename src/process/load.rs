use arrow::{
    array::{Array, ArrayRef, Date32Builder, Float64Builder, StringArray},
    compute::concat_batches,
    csv::ReaderBuilder,
    datatypes::{DataType, Field, FieldRef, Schema},
    record_batch::RecordBatch,
};
use std::{fs, io::Cursor, path::Path, sync::Arc};
use tracing::debug;

use crate::config::{CLAIM_COST, CLAIM_DATE, REQUIRED_COLUMNS};
use crate::error::LoadError;
use crate::process::{
    date_parser::{days_since_epoch, parse_claim_date},
    utils::{clean_str, find_column, parse_cost},
};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const BATCH_SIZE: usize = 64 * 1024;

/// Read the claims CSV at `path` fully into memory.
///
/// Every column is read as text, then `claim_date` becomes `Date32` and
/// `claim_cost` becomes `Float64`. Column names keep their original casing.
/// Any row with an unparseable date or cost fails the whole load.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_claims<P: AsRef<Path>>(path: P) -> Result<RecordBatch, LoadError> {
    let path = path.as_ref();
    // buffer everything so the file handle is released before parsing
    let data = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(bytes = data.len(), "read input");
    parse_claims(&data)
}

/// Parse an in-memory claims CSV. See [`load_claims`].
pub fn parse_claims(data: &[u8]) -> Result<RecordBatch, LoadError> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);

    // 1) header row, as the file spells it
    let headers: Vec<String> = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(data)
        .headers()?
        .iter()
        .map(|h| clean_str(h).to_string())
        .collect();

    for name in REQUIRED_COLUMNS {
        if find_column(&headers, name).is_none() {
            return Err(LoadError::MissingColumn(name));
        }
    }

    // 2) whole table as Utf8
    let raw = read_text_table(data, &headers)?;
    debug!(rows = raw.num_rows(), cols = raw.num_columns(), "parsed csv");

    // 3) type the date and cost columns
    let mut fields: Vec<FieldRef> = raw.schema().fields().iter().cloned().collect();
    let mut columns: Vec<ArrayRef> = raw.columns().to_vec();

    let date_idx = find_column(&headers, CLAIM_DATE).ok_or(LoadError::MissingColumn(CLAIM_DATE))?;
    columns[date_idx] = convert_dates(text_column(&raw, date_idx)?)?;
    fields[date_idx] = Arc::new(Field::new(&headers[date_idx], DataType::Date32, false));

    let cost_idx = find_column(&headers, CLAIM_COST).ok_or(LoadError::MissingColumn(CLAIM_COST))?;
    columns[cost_idx] = convert_costs(text_column(&raw, cost_idx)?)?;
    fields[cost_idx] = Arc::new(Field::new(&headers[cost_idx], DataType::Float64, false));

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

fn read_text_table(data: &[u8], headers: &[String]) -> Result<RecordBatch, LoadError> {
    let fields: Vec<Field> = headers
        .iter()
        .map(|n| Field::new(n, DataType::Utf8, true))
        .collect();
    let schema = Arc::new(Schema::new(fields));

    let reader = ReaderBuilder::new(schema.clone())
        .with_header(true)
        .with_batch_size(BATCH_SIZE)
        .with_quote(b'"')
        .with_delimiter(b',')
        .build(Cursor::new(data))?;

    let batches = reader.collect::<Result<Vec<_>, _>>()?;
    Ok(concat_batches(&schema, &batches)?)
}

fn text_column(batch: &RecordBatch, idx: usize) -> Result<&StringArray, LoadError> {
    let col = batch.column(idx);
    col.as_any().downcast_ref::<StringArray>().ok_or_else(|| {
        LoadError::Arrow(arrow::error::ArrowError::SchemaError(format!(
            "column {} is {}, expected Utf8",
            idx,
            col.data_type()
        )))
    })
}

fn convert_dates(values: &StringArray) -> Result<ArrayRef, LoadError> {
    let mut b = Date32Builder::with_capacity(values.len());
    for (i, opt) in values.iter().enumerate() {
        let raw = opt.unwrap_or_default();
        let date = parse_claim_date(raw).ok_or_else(|| LoadError::InvalidDate {
            row: i + 1,
            value: raw.to_string(),
        })?;
        b.append_value(days_since_epoch(date));
    }
    Ok(Arc::new(b.finish()))
}

fn convert_costs(values: &StringArray) -> Result<ArrayRef, LoadError> {
    let mut b = Float64Builder::with_capacity(values.len());
    for (i, opt) in values.iter().enumerate() {
        let raw = opt.unwrap_or_default();
        let cost = parse_cost(raw).ok_or_else(|| LoadError::InvalidCost {
            row: i + 1,
            value: raw.to_string(),
        })?;
        b.append_value(cost);
    }
    Ok(Arc::new(b.finish()))
}
