//! Stage-scoped error taxonomy
//!
//! Structural errors (ingest, schema) abort the run with a distinct exit
//! code. Data-quality findings are reported per row and never abort.
//! Ratio computations never error at all; an undefined denominator yields
//! `None` and is surfaced only as a diagnostic count.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input file is missing or unreadable. Fatal, nothing was processed.
    #[error("cannot read input file '{}': {reason}", path.display())]
    Ingest { path: PathBuf, reason: String },

    /// The header lacks columns required by the cleaning policy. Fatal.
    #[error("required column(s) missing from header: {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    /// A cleaned row still violates the required-column policy. The row is
    /// skipped; this is an internal-consistency check, not a user error.
    #[error("row {row}: required value '{column}' invalid after cleaning")]
    DataQuality { row: usize, column: String },
}

impl PipelineError {
    /// Process exit code for this error when it aborts the run.
    pub fn exit_code(&self) -> u8 {
        match self {
            PipelineError::Ingest { .. } => 2,
            PipelineError::Schema { .. } => 3,
            PipelineError::DataQuality { .. } => 4,
        }
    }
}
