//! Tests for CSV ingestion and schema resolution

mod common;

use common::{write_fixture, COVID_CSV, MESSY_SALES_CSV, SALES_CSV};
use std::path::Path;
use tally::pipeline::{get_column_names, load_dataset, PipelineError, SchemaKind};

#[test]
fn test_load_clean_sales_file() {
    let (_dir, path) = write_fixture("sales.csv", SALES_CSV);

    let raw = load_dataset(&path, 100, None).unwrap();

    assert_eq!(raw.schema.kind, SchemaKind::Sales);
    assert_eq!(raw.rows.len(), 4);
    assert_eq!(raw.rows[0].key.as_deref(), Some("ProdA"));
    assert_eq!(raw.rows[0].measures, vec![Some(3.0), Some(60.0)]);
}

#[test]
fn test_load_detects_epidemic_schema() {
    let (_dir, path) = write_fixture("covid.csv", COVID_CSV);

    let raw = load_dataset(&path, 100, None).unwrap();

    assert_eq!(raw.schema.kind, SchemaKind::Epidemic);
    assert_eq!(raw.rows.len(), 4);
    assert_eq!(raw.rows[0].iso.as_deref(), Some("AND"));
}

#[test]
fn test_missing_file_is_ingest_error() {
    let err = load_dataset(Path::new("no_such_file.csv"), 100, None).unwrap_err();

    match err {
        PipelineError::Ingest { ref path, .. } => {
            assert_eq!(path, Path::new("no_such_file.csv"));
        }
        other => panic!("expected Ingest error, got {other:?}"),
    }
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_missing_columns_is_schema_error() {
    let (_dir, path) = write_fixture("bad.csv", "Product,Date\nProdA,2024-01-01\n");

    let err = load_dataset(&path, 100, None).unwrap_err();

    match err {
        PipelineError::Schema { ref missing } => {
            assert_eq!(*missing, vec!["Quantity Sold", "Revenue ($)"]);
        }
        other => panic!("expected Schema error, got {other:?}"),
    }
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn test_forced_schema_rejects_mismatched_header() {
    let (_dir, path) = write_fixture("sales.csv", SALES_CSV);

    let err = load_dataset(&path, 100, Some(SchemaKind::Epidemic)).unwrap_err();

    assert!(matches!(err, PipelineError::Schema { .. }));
}

#[test]
fn test_missing_and_malformed_cells_load_as_none() {
    let (_dir, path) = write_fixture("messy.csv", MESSY_SALES_CSV);

    let raw = load_dataset(&path, 100, None).unwrap();

    assert_eq!(raw.rows.len(), 5);
    // Blank quantity
    assert_eq!(raw.rows[1].measures[0], None);
    // Blank revenue
    assert_eq!(raw.rows[2].measures[1], None);
    // Blank key
    assert_eq!(raw.rows[3].key, None);
    // Unparsable date
    assert_eq!(raw.rows[4].date, None);
}

#[test]
fn test_get_column_names() {
    let (_dir, path) = write_fixture("sales.csv", SALES_CSV);

    let columns = get_column_names(&path).unwrap();

    assert_eq!(columns, vec!["Product", "Date", "Quantity Sold", "Revenue ($)"]);
}
