//! End-to-end pipeline tests driving the compiled binary

mod common;

use assert_cmd::Command;
use common::{write_fixture, COVID_CSV, SALES_CSV};
use predicates::prelude::*;
use tempfile::TempDir;

fn tally() -> Command {
    Command::cargo_bin("tally").unwrap()
}

#[test]
fn test_sales_run_succeeds_and_writes_reports() {
    let (_dir, input) = write_fixture("sales.csv", SALES_CSV);
    let out = TempDir::new().unwrap();

    tally()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(out.path())
        .arg("--quiet")
        .assert()
        .success();

    assert!(out.path().join("daily_revenue_trend.png").exists());
    assert!(out.path().join("revenue_by_product.png").exists());
    assert!(out.path().join("quantity_histogram.png").exists());
    assert!(out.path().join("quantity_vs_revenue.png").exists());
    assert!(out.path().join("sales_summary.txt").exists());
}

#[test]
fn test_epidemic_run_succeeds_and_writes_reports() {
    let (_dir, input) = write_fixture("covid.csv", COVID_CSV);
    let out = TempDir::new().unwrap();

    tally()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(out.path())
        .arg("--quiet")
        .assert()
        .success();

    assert!(out.path().join("total_cases_over_time.png").exists());
    assert!(out.path().join("death_rate_trend.png").exists());
    assert!(out.path().join("global_cases_choropleth.html").exists());
    assert!(out.path().join("epidemic_summary.txt").exists());
}

#[test]
fn test_missing_input_exits_with_ingest_code() {
    let out = TempDir::new().unwrap();

    tally()
        .arg("-i")
        .arg("does_not_exist.csv")
        .arg("-o")
        .arg(out.path())
        .arg("--quiet")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot read input file"));
}

#[test]
fn test_bad_header_exits_with_schema_code() {
    let (_dir, input) = write_fixture("bad.csv", "Product,Date\nProdA,2024-01-01\n");
    let out = TempDir::new().unwrap();

    tally()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(out.path())
        .arg("--quiet")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Quantity Sold"));
}

#[test]
fn test_filter_restricts_the_report() {
    let (_dir, input) = write_fixture("sales.csv", SALES_CSV);
    let out = TempDir::new().unwrap();

    tally()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(out.path())
        .arg("--filter")
        .arg("ProdB")
        .arg("--quiet")
        .assert()
        .success();

    let summary = std::fs::read_to_string(out.path().join("sales_summary.txt")).unwrap();
    assert!(summary.contains("Total Revenue: $20.00"));
    assert!(summary.contains("Best-Selling Product: ProdB"));
}

#[test]
fn test_filter_matching_nothing_fails_cleanly() {
    let (_dir, input) = write_fixture("sales.csv", SALES_CSV);
    let out = TempDir::new().unwrap();

    tally()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(out.path())
        .arg("--filter")
        .arg("NoSuchProduct")
        .arg("--quiet")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no records survived"));
}

#[test]
fn test_repeated_runs_are_byte_identical() {
    let (_dir, input) = write_fixture("sales.csv", SALES_CSV);
    let out_a = TempDir::new().unwrap();
    let out_b = TempDir::new().unwrap();

    for out in [&out_a, &out_b] {
        tally()
            .arg("-i")
            .arg(&input)
            .arg("-o")
            .arg(out.path())
            .arg("--quiet")
            .assert()
            .success();
    }

    let first = std::fs::read(out_a.path().join("sales_summary.txt")).unwrap();
    let second = std::fs::read(out_b.path().join("sales_summary.txt")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_schema_override_rejects_mismatched_file() {
    let (_dir, input) = write_fixture("sales.csv", SALES_CSV);
    let out = TempDir::new().unwrap();

    tally()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(out.path())
        .arg("--schema")
        .arg("epidemic")
        .arg("--quiet")
        .assert()
        .code(3);
}
