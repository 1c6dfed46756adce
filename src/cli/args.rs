//! Command-line argument definitions using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::pipeline::SchemaKind;

/// Tally - Clean, aggregate and chart a time-indexed CSV dataset
#[derive(Parser, Debug)]
#[command(name = "tally")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (delimited text, first line is the header)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Directory where charts and the text summary are written
    #[arg(short, long, default_value = "reports")]
    pub output_dir: PathBuf,

    /// Category/location filters (comma-separated).
    /// When given, rows whose identifier is not listed are skipped.
    #[arg(short, long, value_delimiter = ',')]
    pub filter: Vec<String>,

    /// Input schema. "auto" detects it from the header row.
    #[arg(long, value_enum, default_value_t = SchemaArg::Auto)]
    pub schema: SchemaArg,

    /// Number of rows to use for schema inference.
    /// Use 0 for a full table scan (slow for large files).
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Suppress the banner, spinners and step output
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaArg {
    /// Detect from the header row
    Auto,
    /// Sales transactions (Product / Date / Quantity Sold / Revenue ($))
    Sales,
    /// Epidemiological statistics (location / iso_code / date / totals)
    Epidemic,
}

impl SchemaArg {
    /// The forced schema kind, or `None` for auto-detection.
    pub fn kind(self) -> Option<SchemaKind> {
        match self {
            SchemaArg::Auto => None,
            SchemaArg::Sales => Some(SchemaKind::Sales),
            SchemaArg::Epidemic => Some(SchemaKind::Epidemic),
        }
    }
}
