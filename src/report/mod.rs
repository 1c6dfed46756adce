//! Report artifact generation
//!
//! Every artifact renders independently; one failing chart never blocks the
//! others or the run. The orchestrator fans the artifact list out over the
//! rayon pool and collects one `Result` per artifact.

pub mod charts;
pub mod choropleth;
pub mod summary;

pub use charts::Series;
pub use summary::{render_text_summary, write_text_summary, RunSummary};

use std::path::Path;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use rayon::prelude::*;

use crate::pipeline::{AggregateRow, Dataset, HeadlineMetrics, RatioSeries, SchemaKind};

/// The artifacts one run can produce. Which of them apply depends on the
/// input schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    /// Value measure over time (revenue, case counts).
    TrendLine,
    /// Value measure per category.
    CategoryBars,
    /// Distribution of the first measure across all records.
    Histogram,
    /// First measure against second measure, colored per category.
    Scatter,
    /// Deaths-per-case ratio over time, epidemic data only.
    RatioTrend,
    /// Death counts over time, epidemic data only.
    DeathsTrend,
    /// Vaccination counts over time, epidemic data only.
    VaccinationTrend,
    /// Interactive world map of the latest case counts, epidemic data only.
    Choropleth,
    /// Plain-text headline summary.
    TextSummary,
}

impl Artifact {
    /// The artifacts produced for one schema, in a fixed order.
    pub fn all_for(kind: SchemaKind) -> Vec<Artifact> {
        match kind {
            SchemaKind::Sales => vec![
                Artifact::TrendLine,
                Artifact::CategoryBars,
                Artifact::Histogram,
                Artifact::Scatter,
                Artifact::TextSummary,
            ],
            SchemaKind::Epidemic => vec![
                Artifact::TrendLine,
                Artifact::CategoryBars,
                Artifact::Histogram,
                Artifact::Scatter,
                Artifact::RatioTrend,
                Artifact::DeathsTrend,
                Artifact::VaccinationTrend,
                Artifact::Choropleth,
                Artifact::TextSummary,
            ],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Artifact::TrendLine => "trend line",
            Artifact::CategoryBars => "category bars",
            Artifact::Histogram => "histogram",
            Artifact::Scatter => "scatter plot",
            Artifact::RatioTrend => "ratio trend",
            Artifact::DeathsTrend => "deaths trend",
            Artifact::VaccinationTrend => "vaccination trend",
            Artifact::Choropleth => "choropleth map",
            Artifact::TextSummary => "text summary",
        }
    }

    pub fn file_name(&self, kind: SchemaKind) -> &'static str {
        match (self, kind) {
            (Artifact::TrendLine, SchemaKind::Sales) => "daily_revenue_trend.png",
            (Artifact::TrendLine, SchemaKind::Epidemic) => "total_cases_over_time.png",
            (Artifact::CategoryBars, SchemaKind::Sales) => "revenue_by_product.png",
            (Artifact::CategoryBars, SchemaKind::Epidemic) => "cases_by_location.png",
            (Artifact::Histogram, SchemaKind::Sales) => "quantity_histogram.png",
            (Artifact::Histogram, SchemaKind::Epidemic) => "cases_histogram.png",
            (Artifact::Scatter, SchemaKind::Sales) => "quantity_vs_revenue.png",
            (Artifact::Scatter, SchemaKind::Epidemic) => "cases_vs_deaths.png",
            (Artifact::RatioTrend, _) => "death_rate_trend.png",
            (Artifact::DeathsTrend, _) => "total_deaths_over_time.png",
            (Artifact::VaccinationTrend, _) => "vaccination_progress_over_time.png",
            (Artifact::Choropleth, _) => "global_cases_choropleth.html",
            (Artifact::TextSummary, SchemaKind::Sales) => "sales_summary.txt",
            (Artifact::TextSummary, SchemaKind::Epidemic) => "epidemic_summary.txt",
        }
    }
}

/// Everything the renderers read. All fields are borrowed; the pipeline
/// stages own the data.
pub struct ReportInputs<'a> {
    pub dataset: &'a Dataset,
    pub by_key: &'a [AggregateRow<String>],
    pub by_date: &'a [AggregateRow<NaiveDate>],
    pub by_key_date: &'a [AggregateRow<(String, NaiveDate)>],
    pub headline: &'a HeadlineMetrics,
    /// Deaths-per-case ratio series, present only for epidemic data.
    pub ratios: Option<&'a RatioSeries>,
}

/// Which artifacts were written and which failed, with the failure reason.
#[derive(Debug, Default)]
pub struct ReportOutcome {
    pub succeeded: Vec<&'static str>,
    pub failed: Vec<(&'static str, String)>,
}

impl ReportOutcome {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Render every applicable artifact into `output_dir`.
///
/// Artifacts render in parallel and independently. The outcome lists both
/// halves; a partial failure is reported, not propagated.
pub fn emit_artifacts(output_dir: &Path, inputs: &ReportInputs) -> ReportOutcome {
    let kind = inputs.dataset.schema.kind;
    let results: Vec<(&'static str, Result<()>)> = Artifact::all_for(kind)
        .into_par_iter()
        .map(|artifact| {
            let path = output_dir.join(artifact.file_name(kind));
            (artifact.name(), render(artifact, &path, inputs))
        })
        .collect();

    let mut outcome = ReportOutcome::default();
    for (name, result) in results {
        match result {
            Ok(()) => outcome.succeeded.push(name),
            Err(err) => outcome.failed.push((name, format!("{err:#}"))),
        }
    }
    outcome
}

fn render(artifact: Artifact, path: &Path, inputs: &ReportInputs) -> Result<()> {
    let schema = &inputs.dataset.schema;
    let value = schema.value_measure();

    match artifact {
        Artifact::TrendLine => {
            let series = trend_series(inputs, value);
            charts::line_chart(
                path,
                &format!("{} Over Time", schema.measures[value].label),
                schema.measures[value].label,
                &series,
            )
        }
        Artifact::CategoryBars => {
            let categories: Vec<String> =
                inputs.by_key.iter().map(|row| row.key.clone()).collect();
            let values: Vec<f64> = inputs.by_key.iter().map(|row| row.sums[value]).collect();
            charts::bar_chart(
                path,
                &format!("{} by {}", schema.measures[value].label, schema.key_label),
                schema.measures[value].label,
                &categories,
                &values,
            )
        }
        Artifact::Histogram => {
            let values: Vec<f64> = inputs
                .dataset
                .records
                .iter()
                .map(|r| r.measures[0])
                .collect();
            charts::histogram(
                path,
                &format!("{} Distribution", schema.measures[0].label),
                schema.measures[0].label,
                &values,
            )
        }
        Artifact::Scatter => {
            let groups = scatter_groups(inputs);
            charts::scatter_chart(
                path,
                &format!(
                    "{} vs {}",
                    schema.measures[0].label, schema.measures[1].label
                ),
                schema.measures[0].label,
                schema.measures[1].label,
                &groups,
            )
        }
        Artifact::RatioTrend => {
            let ratios = inputs
                .ratios
                .ok_or_else(|| anyhow!("no ratio series derived"))?;
            let series: Vec<Series> = ratios
                .series
                .iter()
                .map(|(key, points)| Series {
                    name: key.clone(),
                    points: points.clone(),
                })
                .collect();
            charts::line_chart(path, "Death Rate Over Time", "Deaths per Case", &series)
        }
        Artifact::DeathsTrend => charts::line_chart(
            path,
            "Total Deaths Over Time",
            "Total Deaths",
            &key_measure_series(inputs, 1),
        ),
        Artifact::VaccinationTrend => charts::line_chart(
            path,
            "Vaccination Progress Over Time",
            "Total Vaccinations",
            &key_measure_series(inputs, 2),
        ),
        Artifact::Choropleth => {
            choropleth::write_choropleth(path, "Global Case Counts", inputs.dataset, 0)
        }
        Artifact::TextSummary => write_text_summary(path, schema, inputs.headline),
    }
}

/// Trend lines for the main time chart: one overall line for sales data,
/// one line per location for epidemic data.
fn trend_series(inputs: &ReportInputs, measure: usize) -> Vec<Series> {
    match inputs.dataset.schema.kind {
        SchemaKind::Sales => vec![Series {
            name: inputs.dataset.schema.measures[measure].label.to_string(),
            points: inputs
                .by_date
                .iter()
                .map(|row| (row.key, row.sums[measure]))
                .collect(),
        }],
        SchemaKind::Epidemic => key_measure_series(inputs, measure),
    }
}

/// One chronological series per key, built from the (key, date) aggregates.
/// Rows arrive key-major and date-ascending, so consecutive grouping is
/// enough.
fn key_measure_series(inputs: &ReportInputs, measure: usize) -> Vec<Series> {
    let mut series: Vec<Series> = Vec::new();
    for row in inputs.by_key_date {
        let (key, date) = &row.key;
        let point = (*date, row.sums[measure]);
        match series.last_mut() {
            Some(last) if &last.name == key => last.points.push(point),
            _ => series.push(Series {
                name: key.clone(),
                points: vec![point],
            }),
        }
    }
    series
}

/// Per-record (first measure, second measure) points grouped by key.
fn scatter_groups(inputs: &ReportInputs) -> Vec<(String, Vec<(f64, f64)>)> {
    let mut groups: Vec<(String, Vec<(f64, f64)>)> = Vec::new();
    for record in &inputs.dataset.records {
        let point = (record.measures[0], record.measures[1]);
        match groups.iter_mut().find(|(key, _)| key == &record.key) {
            Some((_, points)) => points.push(point),
            None => groups.push((record.key.clone(), vec![point])),
        }
    }
    groups
}
