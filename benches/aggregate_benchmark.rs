//! Benchmark for the clean and aggregate stages
//!
//! Run with: cargo bench --bench aggregate_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use chrono::NaiveDate;
use rand::prelude::*;
use rand::SeedableRng;

use tally::pipeline::{
    clean_dataset, totals_by_date, totals_by_key, totals_by_key_and_date, RawDataset, RawRecord,
    TableSchema,
};

/// Generate synthetic raw sales rows with a controlled share of missing values
fn generate_raw_dataset(n_rows: usize, n_keys: usize, missing_share: f64, seed: u64) -> RawDataset {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    let rows = (0..n_rows)
        .map(|_| {
            let key = format!("Product{}", rng.gen_range(0..n_keys));
            let date = base + chrono::Duration::days(rng.gen_range(0..365));
            let quantity = if rng.gen::<f64>() < missing_share {
                None
            } else {
                Some(rng.gen_range(1..50) as f64)
            };
            let revenue = if rng.gen::<f64>() < missing_share {
                None
            } else {
                Some(rng.gen::<f64>() * 500.0)
            };
            RawRecord {
                key: Some(key),
                iso: None,
                date: Some(date),
                measures: vec![quantity, revenue],
            }
        })
        .collect();

    RawDataset {
        schema: TableSchema::sales(),
        rows,
    }
}

/// Benchmark the cleaning pass at varying sizes and missing-value shares
fn benchmark_clean(c: &mut Criterion) {
    let mut group = c.benchmark_group("clean");

    for n_rows in [10_000, 100_000, 500_000] {
        for missing_share in [0.0, 0.1] {
            let raw = generate_raw_dataset(n_rows, 50, missing_share, 42);
            group.throughput(Throughput::Elements(n_rows as u64));

            group.bench_with_input(
                BenchmarkId::new(
                    format!("missing_{:.0}pct", missing_share * 100.0),
                    n_rows,
                ),
                &raw,
                |b, raw| {
                    b.iter(|| clean_dataset(black_box(raw.clone())));
                },
            );
        }
    }

    group.finish();
}

/// Benchmark the three aggregations over a cleaned dataset
fn benchmark_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for n_rows in [10_000, 100_000, 500_000] {
        let raw = generate_raw_dataset(n_rows, 50, 0.0, 42);
        let (dataset, _) = clean_dataset(raw);
        group.throughput(Throughput::Elements(n_rows as u64));

        group.bench_with_input(BenchmarkId::new("by_key", n_rows), &dataset, |b, dataset| {
            b.iter(|| totals_by_key(black_box(dataset)));
        });

        group.bench_with_input(
            BenchmarkId::new("by_date", n_rows),
            &dataset,
            |b, dataset| {
                b.iter(|| totals_by_date(black_box(dataset)));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("by_key_and_date", n_rows),
            &dataset,
            |b, dataset| {
                b.iter(|| totals_by_key_and_date(black_box(dataset)));
            },
        );
    }

    group.finish();
}

/// Benchmark impact of group cardinality on the by-key aggregation
fn benchmark_key_cardinality(c: &mut Criterion) {
    let mut group = c.benchmark_group("key_cardinality");

    for n_keys in [10, 100, 1_000, 10_000] {
        let raw = generate_raw_dataset(100_000, n_keys, 0.0, 42);
        let (dataset, _) = clean_dataset(raw);

        group.bench_with_input(
            BenchmarkId::new("by_key", n_keys),
            &dataset,
            |b, dataset| {
                b.iter(|| totals_by_key(black_box(dataset)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_clean,
    benchmark_aggregate,
    benchmark_key_cardinality,
);
criterion_main!(benches);
