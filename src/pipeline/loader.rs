//! CSV ingestion via Polars
//!
//! The only place where file-not-found surfaces. The frame is scanned
//! lazily, the header is matched against a recognized schema, and the
//! columns are materialized into `RawRecord`s for the cleaner.

use std::path::Path;

use chrono::NaiveDate;
use polars::prelude::*;

use crate::pipeline::dataset::{RawDataset, RawRecord};
use crate::pipeline::error::PipelineError;
use crate::pipeline::schema::{SchemaKind, TableSchema};

/// Calendar-date format accepted in the date column.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Load a delimited file into raw records.
///
/// `forced` skips header-based schema detection; `infer_schema_length` is
/// passed through to Polars (0 means a full-table scan).
pub fn load_dataset(
    path: &Path,
    infer_schema_length: usize,
    forced: Option<SchemaKind>,
) -> Result<RawDataset, PipelineError> {
    let df = read_frame(path, infer_schema_length)?;

    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    let schema = match forced {
        Some(kind) => TableSchema::for_kind(kind).validate(&columns)?,
        None => TableSchema::detect(&columns)?,
    };

    let rows = extract_rows(&df, &schema).map_err(|e| PipelineError::Ingest {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(RawDataset { schema, rows })
}

/// Column names from the header alone, without materializing rows.
pub fn get_column_names(path: &Path) -> Result<Vec<String>, PipelineError> {
    let df = read_frame(path, 100)?;
    Ok(df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect())
}

fn read_frame(path: &Path, infer_schema_length: usize) -> Result<DataFrame, PipelineError> {
    let infer = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    LazyCsvReader::new(path)
        .with_infer_schema_length(infer)
        .with_ignore_errors(true)
        .finish()
        .and_then(|lf| lf.collect())
        .map_err(|e| PipelineError::Ingest {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

fn extract_rows(df: &DataFrame, schema: &TableSchema) -> PolarsResult<Vec<RawRecord>> {
    let keys = string_column(df, schema.key_column)?;
    let dates = string_column(df, schema.date_column)?;
    let isos = match schema.iso_column {
        Some(column) => Some(string_column(df, column)?),
        None => None,
    };
    let measures: Vec<Vec<Option<f64>>> = schema
        .measures
        .iter()
        .map(|m| float_column(df, m.column))
        .collect::<PolarsResult<_>>()?;

    let mut rows = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        rows.push(RawRecord {
            key: keys[i].clone(),
            iso: isos.as_ref().and_then(|col| col[i].clone()),
            date: dates[i]
                .as_deref()
                .and_then(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).ok()),
            measures: measures.iter().map(|col| col[i]).collect(),
        });
    }
    Ok(rows)
}

/// Materialize a column as trimmed strings; blanks become `None`.
fn string_column(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    let casted = df.column(name)?.cast(&DataType::String)?;
    let ca = casted.str()?;
    Ok((0..ca.len())
        .map(|i| {
            ca.get(i)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        })
        .collect())
}

/// Materialize a column as floats; non-numeric and non-finite values become
/// `None` so the cleaner treats them as missing rather than failing.
fn float_column(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    let casted = df.column(name)?.cast(&DataType::Float64)?;
    let ca = casted.f64()?;
    Ok((0..ca.len())
        .map(|i| ca.get(i).filter(|v| v.is_finite()))
        .collect())
}
