//! Text summary artifact and the console run summary
//!
//! The text summary follows a fixed template so that identical inputs
//! produce byte-identical files.

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{CleanReport, HeadlineMetrics, SchemaKind, TableSchema};

/// Render the plain-text summary for a finished run.
pub fn render_text_summary(schema: &TableSchema, headline: &HeadlineMetrics) -> String {
    let top_key = headline.top_key.as_deref().unwrap_or("n/a");
    let peak_date = headline
        .peak_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "n/a".to_string());

    match schema.kind {
        SchemaKind::Sales => format!(
            "Sales Summary:\n\
             --------------\n\
             Total Revenue: ${}\n\
             Best-Selling Product: {}\n\
             Day with Highest Sales: {}\n",
            format_amount(headline.total_value),
            top_key,
            peak_date,
        ),
        SchemaKind::Epidemic => format!(
            "Epidemic Summary:\n\
             -----------------\n\
             Total Cases: {}\n\
             Most Affected Location: {}\n\
             Peak Reporting Day: {}\n",
            format_count(headline.total_value),
            top_key,
            peak_date,
        ),
    }
}

/// Write the text summary artifact.
pub fn write_text_summary(
    path: &Path,
    schema: &TableSchema,
    headline: &HeadlineMetrics,
) -> Result<()> {
    std::fs::write(path, render_text_summary(schema, headline))
        .with_context(|| format!("failed to write summary to {}", path.display()))?;
    Ok(())
}

/// Fixed-point amount with thousands separators, e.g. `1,234,567.50`.
fn format_amount(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, group_digits(int_part), frac_part)
}

/// Whole count with thousands separators, e.g. `1,234,568`.
fn format_count(value: f64) -> String {
    let formatted = format!("{:.0}", value.abs());
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}", sign, group_digits(&formatted))
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Summary of one pipeline run, displayed as a table after completion.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub rows_loaded: usize,
    pub rows_kept: usize,
    pub clean: CleanReport,
    pub quality_skipped: usize,
    pub undefined_ratios: usize,
    pub artifacts_written: Vec<&'static str>,
    pub artifacts_failed: Vec<(&'static str, String)>,
}

impl RunSummary {
    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("RUN SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("📁 Rows Loaded"),
            Cell::new(self.rows_loaded),
        ]);
        table.add_row(vec![
            Cell::new("🗑️  Rows Dropped"),
            Cell::new(self.clean.dropped_rows).fg(if self.clean.dropped_rows == 0 {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);
        table.add_row(vec![
            Cell::new("✏️  Values Defaulted"),
            Cell::new(self.clean.defaulted_values),
        ]);
        table.add_row(vec![
            Cell::new("🔍 Quality Skips"),
            Cell::new(self.quality_skipped).fg(if self.quality_skipped == 0 {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);
        table.add_row(vec![
            Cell::new("∅ Undefined Ratios"),
            Cell::new(self.undefined_ratios),
        ]);
        table.add_row(vec![
            Cell::new("✅ Rows Kept"),
            Cell::new(self.rows_kept)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![
            Cell::new("🖼️  Artifacts Written"),
            Cell::new(self.artifacts_written.len())
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![
            Cell::new("⚠️  Artifacts Failed"),
            Cell::new(self.artifacts_failed.len()).fg(if self.artifacts_failed.is_empty() {
                Color::White
            } else {
                Color::Red
            }),
        ]);

        // Indent the table
        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        if !self.artifacts_failed.is_empty() {
            println!();
            println!(
                "      {} {}:",
                style("Failed Artifacts").yellow(),
                style(format!("({})", self.artifacts_failed.len())).dim()
            );
            for (name, reason) in &self.artifacts_failed {
                println!("        {} {}: {}", style("•").dim(), name, reason);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_amount(100.0), "100.00");
        assert_eq!(format_amount(1234567.5), "1,234,567.50");
        assert_eq!(format_amount(-9000.0), "-9,000.00");
        assert_eq!(format_count(1234.0), "1,234");
        assert_eq!(format_count(999.0), "999");
    }
}
