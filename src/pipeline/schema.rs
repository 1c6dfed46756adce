//! Recognized input schemas and the per-column cleaning policy
//!
//! The policy is declared once per schema and validated against the header
//! at load time, instead of being an implicit set of ad hoc fill/drop calls.

use crate::pipeline::error::PipelineError;

/// How a missing value in a measure column is handled by the cleaner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MissingPolicy {
    /// Drop the whole row when the value is missing.
    Required,
    /// Substitute a fixed default and keep the row.
    DefaultedTo(f64),
}

/// One numeric measure column of a recognized schema.
#[derive(Debug, Clone)]
pub struct MeasureColumn {
    /// Column name as it appears in the header.
    pub column: &'static str,
    /// Human-readable label used in chart axes and summaries.
    pub label: &'static str,
    pub policy: MissingPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    Sales,
    Epidemic,
}

/// Resolved column set for one input file, including the cleaning policy.
///
/// The key and date columns are always required; only measure columns carry
/// a configurable policy.
#[derive(Debug, Clone)]
pub struct TableSchema {
    pub kind: SchemaKind,
    pub key_column: &'static str,
    pub key_label: &'static str,
    pub date_column: &'static str,
    /// ISO country code column, present only for the epidemic schema.
    pub iso_column: Option<&'static str>,
    pub measures: Vec<MeasureColumn>,
}

impl TableSchema {
    /// Sales transactions: one row per product/date with quantity and revenue.
    pub fn sales() -> Self {
        TableSchema {
            kind: SchemaKind::Sales,
            key_column: "Product",
            key_label: "Product",
            date_column: "Date",
            iso_column: None,
            measures: vec![
                MeasureColumn {
                    column: "Quantity Sold",
                    label: "Quantity Sold",
                    policy: MissingPolicy::Required,
                },
                MeasureColumn {
                    column: "Revenue ($)",
                    label: "Revenue ($)",
                    policy: MissingPolicy::DefaultedTo(0.0),
                },
            ],
        }
    }

    /// Epidemiological statistics: one row per location/date with cumulative
    /// case, death and vaccination counts. Vaccination counts default to zero
    /// when missing; case and death counts are required.
    pub fn epidemic() -> Self {
        TableSchema {
            kind: SchemaKind::Epidemic,
            key_column: "location",
            key_label: "Location",
            date_column: "date",
            iso_column: Some("iso_code"),
            measures: vec![
                MeasureColumn {
                    column: "total_cases",
                    label: "Total Cases",
                    policy: MissingPolicy::Required,
                },
                MeasureColumn {
                    column: "total_deaths",
                    label: "Total Deaths",
                    policy: MissingPolicy::Required,
                },
                MeasureColumn {
                    column: "total_vaccinations",
                    label: "Total Vaccinations",
                    policy: MissingPolicy::DefaultedTo(0.0),
                },
            ],
        }
    }

    pub fn for_kind(kind: SchemaKind) -> Self {
        match kind {
            SchemaKind::Sales => Self::sales(),
            SchemaKind::Epidemic => Self::epidemic(),
        }
    }

    /// Pick the schema matching a header and verify all its columns are
    /// present. Headers carrying `location` or `iso_code` select the
    /// epidemic schema; everything else is tried as sales data.
    pub fn detect(columns: &[String]) -> Result<Self, PipelineError> {
        let candidate = if columns.iter().any(|c| c == "location" || c == "iso_code") {
            Self::epidemic()
        } else {
            Self::sales()
        };
        candidate.validate(columns)
    }

    /// Verify every column this schema needs exists in the header.
    pub fn validate(self, columns: &[String]) -> Result<Self, PipelineError> {
        let missing: Vec<String> = self
            .required_columns()
            .into_iter()
            .filter(|name| !columns.iter().any(|c| c == name))
            .map(|name| name.to_string())
            .collect();

        if missing.is_empty() {
            Ok(self)
        } else {
            Err(PipelineError::Schema { missing })
        }
    }

    /// All column names this schema expects in the header.
    pub fn required_columns(&self) -> Vec<&'static str> {
        let mut columns = vec![self.key_column, self.date_column];
        if let Some(iso) = self.iso_column {
            columns.push(iso);
        }
        columns.extend(self.measures.iter().map(|m| m.column));
        columns
    }

    /// Index of the measure used for totals, trends and the peak-date
    /// selection (revenue for sales, case counts for epidemic data).
    pub fn value_measure(&self) -> usize {
        match self.kind {
            SchemaKind::Sales => 1,
            SchemaKind::Epidemic => 0,
        }
    }

    pub fn measure_index(&self, column: &str) -> Option<usize> {
        self.measures.iter().position(|m| m.column == column)
    }
}
