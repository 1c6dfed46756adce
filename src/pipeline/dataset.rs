//! In-memory dataset types
//!
//! `RawRecord` is what the loader produces: every field may be missing.
//! `Record` is what the cleaner produces: the required fields are present by
//! construction, so downstream stages never re-check them.

use chrono::NaiveDate;

use crate::pipeline::schema::TableSchema;

/// One row as read from the file, before any missing-value policy applies.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub key: Option<String>,
    pub iso: Option<String>,
    pub date: Option<NaiveDate>,
    /// Aligned with the schema's measure columns. Blank cells, non-numeric
    /// values and unparsable dates all load as `None`.
    pub measures: Vec<Option<f64>>,
}

/// One cleaned row. Key and date are guaranteed present; every measure is
/// either the original value or its policy default.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub key: String,
    pub iso: Option<String>,
    pub date: NaiveDate,
    pub measures: Vec<f64>,
}

impl Record {
    /// View a cleaned record as a raw one. Used to feed cleaned data back
    /// through the cleaner when checking idempotence.
    pub fn to_raw(&self) -> RawRecord {
        RawRecord {
            key: Some(self.key.clone()),
            iso: self.iso.clone(),
            date: Some(self.date),
            measures: self.measures.iter().copied().map(Some).collect(),
        }
    }
}

/// Loader output: resolved schema plus raw rows in file-read order.
#[derive(Debug, Clone)]
pub struct RawDataset {
    pub schema: TableSchema,
    pub rows: Vec<RawRecord>,
}

impl RawDataset {
    /// Keep only rows whose key matches one of the given filters. An empty
    /// filter list keeps everything. Row order is preserved.
    pub fn retain_keys(&mut self, filters: &[String]) {
        if filters.is_empty() {
            return;
        }
        self.rows.retain(|row| {
            row.key
                .as_deref()
                .is_some_and(|key| filters.iter().any(|f| f == key))
        });
    }
}

/// Cleaner output: schema plus cleaned records, still in file-read order.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub schema: TableSchema,
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of one measure over every record.
    pub fn measure_total(&self, measure: usize) -> f64 {
        self.records.iter().map(|r| r.measures[measure]).sum()
    }
}
