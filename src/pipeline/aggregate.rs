//! Grouped sums over cleaned records
//!
//! Groups share no state, and a `BTreeMap` keeps output rows unique and
//! ordered by key ascending (lexicographic for strings, chronological for
//! dates), so report ordering is deterministic regardless of input order.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::pipeline::dataset::{Dataset, Record};

/// One group: the key, the per-measure sums and the record count.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow<K> {
    pub key: K,
    /// Aligned with the schema's measure columns.
    pub sums: Vec<f64>,
    pub count: usize,
}

/// Group records by an arbitrary key and sum every schema measure.
///
/// May be invoked any number of times with different keys over the same
/// dataset; each call is an independent aggregation.
pub fn aggregate_by<K, F>(dataset: &Dataset, key_of: F) -> Vec<AggregateRow<K>>
where
    K: Ord + Clone,
    F: Fn(&Record) -> K,
{
    let width = dataset.schema.measures.len();
    let mut groups: BTreeMap<K, AggregateRow<K>> = BTreeMap::new();

    for record in &dataset.records {
        let key = key_of(record);
        let row = groups.entry(key.clone()).or_insert_with(|| AggregateRow {
            key,
            sums: vec![0.0; width],
            count: 0,
        });
        for (sum, value) in row.sums.iter_mut().zip(&record.measures) {
            *sum += value;
        }
        row.count += 1;
    }

    groups.into_values().collect()
}

/// Per-category (or per-location) totals.
pub fn totals_by_key(dataset: &Dataset) -> Vec<AggregateRow<String>> {
    aggregate_by(dataset, |r| r.key.clone())
}

/// Per-date totals across all categories.
pub fn totals_by_date(dataset: &Dataset) -> Vec<AggregateRow<NaiveDate>> {
    aggregate_by(dataset, |r| r.date)
}

/// Per-(category, date) totals, used for multi-series trend charts.
pub fn totals_by_key_and_date(dataset: &Dataset) -> Vec<AggregateRow<(String, NaiveDate)>> {
    aggregate_by(dataset, |r| (r.key.clone(), r.date))
}
