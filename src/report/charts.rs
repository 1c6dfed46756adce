//! Static chart rendering with plotters
//!
//! Every function draws one PNG at a fixed size. Callers pass already
//! aggregated, already ordered data; nothing here recomputes or reorders.

use std::path::Path;

use anyhow::{ensure, Result};
use chrono::NaiveDate;
use plotters::prelude::*;

const CHART_SIZE: (u32, u32) = (1024, 640);
const HISTOGRAM_BINS: usize = 10;

/// One named line on a trend chart, points in chronological order.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub points: Vec<(NaiveDate, f64)>,
}

/// Multi-series line chart over calendar dates.
pub fn line_chart(path: &Path, title: &str, y_desc: &str, series: &[Series]) -> Result<()> {
    let points: Vec<(NaiveDate, f64)> = series.iter().flat_map(|s| s.points.clone()).collect();
    ensure!(!points.is_empty(), "no data points to plot");

    let min_date = points.iter().map(|(d, _)| *d).min().unwrap_or_default();
    let mut max_date = points.iter().map(|(d, _)| *d).max().unwrap_or_default();
    if max_date == min_date {
        max_date = max_date.succ_opt().unwrap_or(max_date);
    }
    let y_max = padded_max(points.iter().map(|(_, v)| *v));

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(72)
        .build_cartesian_2d(min_date..max_date, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_labels(8)
        .x_label_formatter(&|d: &NaiveDate| d.format("%Y-%m-%d").to_string())
        .y_desc(y_desc)
        .draw()?;

    for (idx, s) in series.iter().enumerate() {
        let color = Palette99::pick(idx);
        chart
            .draw_series(LineSeries::new(
                s.points.iter().copied(),
                color.stroke_width(2),
            ))?
            .label(&s.name)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
            });
    }

    if series.len() > 1 {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

/// Vertical bars, one per category, in the given (already sorted) order.
pub fn bar_chart(
    path: &Path,
    title: &str,
    y_desc: &str,
    categories: &[String],
    values: &[f64],
) -> Result<()> {
    ensure!(!categories.is_empty(), "no categories to plot");

    let y_max = padded_max(values.iter().copied());

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let labels = categories.to_vec();
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(72)
        .build_cartesian_2d((0..categories.len()).into_segmented(), 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&move |seg| match seg {
            SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .y_desc(y_desc)
        .draw()?;

    chart.draw_series(values.iter().enumerate().map(|(i, value)| {
        Rectangle::new(
            [
                (SegmentValue::Exact(i), 0.0),
                (SegmentValue::Exact(i + 1), *value),
            ],
            Palette99::pick(i).filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

/// Frequency histogram of one measure over all records.
pub fn histogram(path: &Path, title: &str, x_desc: &str, values: &[f64]) -> Result<()> {
    ensure!(!values.is_empty(), "no values to plot");

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = if max > min { max - min } else { 1.0 };
    let bin_width = span / HISTOGRAM_BINS as f64;

    let mut counts = [0usize; HISTOGRAM_BINS];
    for &value in values {
        let bin = (((value - min) / bin_width) as usize).min(HISTOGRAM_BINS - 1);
        counts[bin] += 1;
    }
    let y_max = padded_max(counts.iter().map(|&c| c as f64));

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(72)
        .build_cartesian_2d(min..min + span, 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(x_desc)
        .y_desc("Frequency")
        .draw()?;

    chart.draw_series(counts.iter().enumerate().map(|(i, &count)| {
        let lo = min + i as f64 * bin_width;
        let hi = lo + bin_width;
        Rectangle::new([(lo, 0.0), (hi, count as f64)], BLUE.mix(0.5).filled())
    }))?;

    root.present()?;
    Ok(())
}

/// Two-measure scatter plot, one color per category group.
pub fn scatter_chart(
    path: &Path,
    title: &str,
    x_desc: &str,
    y_desc: &str,
    groups: &[(String, Vec<(f64, f64)>)],
) -> Result<()> {
    let points: Vec<(f64, f64)> = groups.iter().flat_map(|(_, p)| p.clone()).collect();
    ensure!(!points.is_empty(), "no data points to plot");

    let x_max = padded_max(points.iter().map(|(x, _)| *x));
    let y_max = padded_max(points.iter().map(|(_, y)| *y));

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(72)
        .build_cartesian_2d(0f64..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .draw()?;

    for (idx, (name, group_points)) in groups.iter().enumerate() {
        let color = Palette99::pick(idx);
        chart
            .draw_series(
                group_points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 4, color.filled())),
            )?
            .label(name)
            .legend(move |(x, y)| Circle::new((x + 9, y), 4, color.filled()));
    }

    if groups.len() > 1 {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

/// Upper axis bound with 10% headroom; never collapses to zero.
fn padded_max(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.fold(0f64, f64::max);
    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}
