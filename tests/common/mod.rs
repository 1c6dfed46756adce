//! Shared test utilities and fixture generators

use std::io::Write;
use std::path::PathBuf;

use chrono::NaiveDate;
use tempfile::TempDir;

use tally::pipeline::{Dataset, Record, TableSchema};

/// A small clean sales file with known totals:
/// - total revenue 100.00
/// - ProdA sells 5 units, ProdB sells 2
/// - 2024-01-01 has the highest revenue (70.00)
pub const SALES_CSV: &str = "\
Product,Date,Quantity Sold,Revenue ($)
ProdA,2024-01-01,3,60.00
ProdB,2024-01-01,1,10.00
ProdA,2024-01-02,2,20.00
ProdB,2024-01-02,1,10.00
";

/// Sales file with every kind of missing value:
/// - row 2 lacks the required quantity (dropped)
/// - row 3 lacks the defaulted revenue (kept, revenue 0.0)
/// - row 4 lacks the product key (dropped)
/// - row 5 has an unparsable date (dropped)
pub const MESSY_SALES_CSV: &str = "\
Product,Date,Quantity Sold,Revenue ($)
ProdA,2024-01-01,3,60.00
ProdB,2024-01-01,,10.00
ProdA,2024-01-02,2,
,2024-01-02,1,10.00
ProdB,not-a-date,1,10.00
";

/// A small clean epidemiological file covering two locations.
/// Andorra's first row has zero cases, so its death rate is undefined.
pub const COVID_CSV: &str = "\
location,iso_code,date,total_cases,total_deaths,total_vaccinations
Andorra,AND,2021-01-01,0,0,0
Andorra,AND,2021-01-02,100,2,50
Zimbabwe,ZWE,2021-01-01,400,10,0
Zimbabwe,ZWE,2021-01-02,500,20,120
";

/// Write file contents into a fresh temp directory.
pub fn write_fixture(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    (temp_dir, path)
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Build a cleaned sales record without going through the loader.
pub fn sales_record(key: &str, day: &str, quantity: f64, revenue: f64) -> Record {
    Record {
        key: key.to_string(),
        iso: None,
        date: date(day),
        measures: vec![quantity, revenue],
    }
}

/// Wrap records in a sales dataset.
pub fn sales_dataset(records: Vec<Record>) -> Dataset {
    Dataset {
        schema: TableSchema::sales(),
        records,
    }
}

/// Build a cleaned epidemic record without going through the loader.
pub fn epidemic_record(
    key: &str,
    iso: &str,
    day: &str,
    cases: f64,
    deaths: f64,
    vaccinations: f64,
) -> Record {
    Record {
        key: key.to_string(),
        iso: Some(iso.to_string()),
        date: date(day),
        measures: vec![cases, deaths, vaccinations],
    }
}

/// Wrap records in an epidemic dataset.
pub fn epidemic_dataset(records: Vec<Record>) -> Dataset {
    Dataset {
        schema: TableSchema::epidemic(),
        records,
    }
}
