//! Derived metrics: extremum selection and ratio derivation
//!
//! Ratios with a zero or undefined denominator yield `None`, the undefined
//! sentinel. Consumers skip those points; they are never an error and never
//! a silent zero.

use chrono::NaiveDate;

use crate::pipeline::aggregate::AggregateRow;
use crate::pipeline::dataset::Dataset;

/// Key of the row with the largest value of one measure.
///
/// Ties go to the row appearing first in the input, which for aggregator
/// output is the lexicographically/chronologically smallest key.
pub fn arg_max<K>(rows: &[AggregateRow<K>], measure: usize) -> Option<&K> {
    let mut best: Option<(&K, f64)> = None;
    for row in rows {
        let value = row.sums[measure];
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((&row.key, value)),
        }
    }
    best.map(|(key, _)| key)
}

/// Key of the row with the smallest value of one measure; same tie-break
/// as [`arg_max`].
pub fn arg_min<K>(rows: &[AggregateRow<K>], measure: usize) -> Option<&K> {
    let mut best: Option<(&K, f64)> = None;
    for row in rows {
        let value = row.sums[measure];
        match best {
            Some((_, best_value)) if value >= best_value => {}
            _ => best = Some((&row.key, value)),
        }
    }
    best.map(|(key, _)| key)
}

/// `numerator / denominator`, or `None` when the denominator is zero or
/// either operand is not a finite number.
pub fn safe_ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 || !numerator.is_finite() || !denominator.is_finite() {
        None
    } else {
        Some(numerator / denominator)
    }
}

/// Date-ordered ratio points per key, with undefined points dropped and
/// counted instead of plotted.
#[derive(Debug, Clone, PartialEq)]
pub struct RatioSeries {
    /// One `(key, points)` entry per key, keys ascending, points in
    /// chronological order. Only defined ratios appear.
    pub series: Vec<(String, Vec<(NaiveDate, f64)>)>,
    /// How many ratios came out undefined.
    pub undefined: usize,
}

/// Derive a ratio of two measures over (key, date) aggregates.
pub fn ratio_series(
    rows: &[AggregateRow<(String, NaiveDate)>],
    numerator: usize,
    denominator: usize,
) -> RatioSeries {
    let mut series: Vec<(String, Vec<(NaiveDate, f64)>)> = Vec::new();
    let mut undefined = 0usize;

    for row in rows {
        let (key, date) = &row.key;
        match safe_ratio(row.sums[numerator], row.sums[denominator]) {
            Some(value) => {
                match series.last_mut() {
                    Some((last_key, points)) if last_key == key => points.push((*date, value)),
                    _ => series.push((key.clone(), vec![(*date, value)])),
                }
            }
            None => undefined += 1,
        }
    }

    RatioSeries { series, undefined }
}

/// The scalar metrics quoted in the text summary.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlineMetrics {
    /// Total of the value measure over the whole cleaned dataset.
    pub total_value: f64,
    /// Category with the largest ranked total (best-selling product,
    /// location with most cases). `None` on an empty dataset.
    pub top_key: Option<String>,
    /// Date with the largest value-measure total.
    pub peak_date: Option<NaiveDate>,
}

/// Compute the headline metrics from the two independent aggregations.
pub fn derive_headline(
    dataset: &Dataset,
    by_key: &[AggregateRow<String>],
    by_date: &[AggregateRow<NaiveDate>],
) -> HeadlineMetrics {
    let value = dataset.schema.value_measure();
    // Categories are ranked by units sold for sales data and by case counts
    // for epidemic data; both are the schema's first measure.
    let ranking = 0;

    HeadlineMetrics {
        total_value: dataset.measure_total(value),
        top_key: arg_max(by_key, ranking).cloned(),
        peak_date: arg_max(by_date, value).copied(),
    }
}
