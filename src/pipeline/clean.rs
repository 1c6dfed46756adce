//! Missing-value cleaning
//!
//! Applies the schema's per-column policy exactly once per load: rows
//! missing a required value are dropped, defaulted columns are filled with
//! their fixed default. The pass is idempotent and preserves row order.

use crate::pipeline::dataset::{Dataset, RawDataset, Record};
use crate::pipeline::error::PipelineError;
use crate::pipeline::schema::MissingPolicy;

/// Diagnostics recorded while cleaning.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanReport {
    pub dropped_rows: usize,
    pub defaulted_values: usize,
}

/// Apply the cleaning policy to a raw dataset.
pub fn clean_dataset(raw: RawDataset) -> (Dataset, CleanReport) {
    let mut report = CleanReport::default();
    let mut records = Vec::with_capacity(raw.rows.len());

    'rows: for row in raw.rows {
        // Key and date are required for every schema.
        let Some(key) = row.key else {
            report.dropped_rows += 1;
            continue;
        };
        let Some(date) = row.date else {
            report.dropped_rows += 1;
            continue;
        };

        let mut measures = Vec::with_capacity(row.measures.len());
        for (value, column) in row.measures.iter().zip(raw.schema.measures.iter()) {
            match (value, column.policy) {
                (Some(v), _) => measures.push(*v),
                (None, MissingPolicy::DefaultedTo(default)) => {
                    report.defaulted_values += 1;
                    measures.push(default);
                }
                (None, MissingPolicy::Required) => {
                    report.dropped_rows += 1;
                    continue 'rows;
                }
            }
        }

        records.push(Record {
            key,
            iso: row.iso,
            date,
            measures,
        });
    }

    (
        Dataset {
            schema: raw.schema,
            records,
        },
        report,
    )
}

/// Internal-consistency check on a cleaned dataset.
///
/// A correct cleaner never lets a violation through; if one is found the
/// offending record is removed and reported, and the run continues.
pub fn audit_dataset(dataset: &mut Dataset) -> Vec<PipelineError> {
    let schema = dataset.schema.clone();
    let mut violations = Vec::new();
    let mut row = 0usize;

    dataset.records.retain(|record| {
        let verdict = if record.key.is_empty() {
            Some(schema.key_column.to_string())
        } else {
            record
                .measures
                .iter()
                .zip(schema.measures.iter())
                .find(|(value, _)| !value.is_finite())
                .map(|(_, column)| column.column.to_string())
        };

        let keep = match verdict {
            Some(column) => {
                violations.push(PipelineError::DataQuality { row, column });
                false
            }
            None => true,
        };
        row += 1;
        keep
    });

    violations
}
