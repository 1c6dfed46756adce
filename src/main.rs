//! Tally: Dataset Aggregation & Reporting CLI
//!
//! Loads a delimited time-indexed dataset, cleans it against a per-column
//! missing-value policy, computes grouped aggregates and derived metrics,
//! and writes chart and summary artifacts.

use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use tally::cli::{Cli, SchemaArg};
use tally::pipeline::{
    audit_dataset, clean_dataset, derive_headline, load_dataset, ratio_series, totals_by_date,
    totals_by_key, totals_by_key_and_date, PipelineError, RatioSeries, SchemaKind,
};
use tally::report::{emit_artifacts, ReportInputs, RunSummary};
use tally::utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config,
    print_count, print_info, print_step_header, print_success, print_warning,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", style("error:").red().bold());
            match err.downcast_ref::<PipelineError>() {
                Some(pipeline_err) => ExitCode::from(pipeline_err.exit_code()),
                None => ExitCode::FAILURE,
            }
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let run_start = Instant::now();

    if !cli.quiet {
        print_banner(env!("CARGO_PKG_VERSION"));
        print_config(
            &cli.input,
            schema_label(cli.schema),
            &cli.output_dir,
            &cli.filter,
        );
    }

    // Step 1: Load
    if !cli.quiet {
        print_step_header(1, "Load Dataset");
    }
    let spinner = (!cli.quiet).then(|| create_spinner("Reading input file..."));
    let mut raw = load_dataset(&cli.input, cli.infer_schema_length, cli.schema.kind())?;
    let rows_loaded = raw.rows.len();
    if let Some(pb) = &spinner {
        finish_with_success(
            pb,
            &format!("Loaded {} row(s) ({:?} schema)", rows_loaded, raw.schema.kind),
        );
    }

    if !cli.filter.is_empty() {
        raw.retain_keys(&cli.filter);
        if !cli.quiet {
            print_count(
                "row(s) matching filters",
                raw.rows.len(),
                Some(&format!("(of {})", rows_loaded)),
            );
        }
    }

    // Step 2: Clean
    if !cli.quiet {
        print_step_header(2, "Clean");
    }
    let (mut dataset, clean_report) = clean_dataset(raw);
    let violations = audit_dataset(&mut dataset);
    for violation in &violations {
        print_warning(&violation.to_string());
    }
    if !cli.quiet {
        if clean_report.dropped_rows > 0 {
            print_count("row(s) dropped for missing required values", clean_report.dropped_rows, None);
        }
        if clean_report.defaulted_values > 0 {
            print_count("missing value(s) defaulted", clean_report.defaulted_values, None);
        }
        print_success(&format!("{} record(s) ready", dataset.len()));
    }
    anyhow::ensure!(
        !dataset.is_empty(),
        "no records survived cleaning; nothing to report on"
    );

    // Step 3: Aggregate
    if !cli.quiet {
        print_step_header(3, "Aggregate");
    }
    let by_key = totals_by_key(&dataset);
    let by_date = totals_by_date(&dataset);
    let by_key_date = totals_by_key_and_date(&dataset);
    if !cli.quiet {
        print_count(
            &format!("{} group(s)", dataset.schema.key_label.to_lowercase()),
            by_key.len(),
            None,
        );
        print_count("distinct date(s)", by_date.len(), None);
    }

    // Step 4: Derive metrics
    if !cli.quiet {
        print_step_header(4, "Derive Metrics");
    }
    let headline = derive_headline(&dataset, &by_key, &by_date);
    let ratios: Option<RatioSeries> = match dataset.schema.kind {
        // Deaths-per-case ratio; undefined points are counted, not plotted.
        SchemaKind::Epidemic => Some(ratio_series(&by_key_date, 1, 0)),
        SchemaKind::Sales => None,
    };
    if !cli.quiet {
        if let Some(top) = &headline.top_key {
            print_info(&format!("Top {}: {}", dataset.schema.key_label.to_lowercase(), top));
        }
        if let Some(peak) = headline.peak_date {
            print_info(&format!("Peak date: {}", peak.format("%Y-%m-%d")));
        }
        if let Some(r) = &ratios {
            if r.undefined > 0 {
                print_info(&format!("{} undefined ratio point(s) skipped", r.undefined));
            }
        }
    }

    // Step 5: Emit artifacts
    if !cli.quiet {
        print_step_header(5, "Emit Artifacts");
    }
    std::fs::create_dir_all(&cli.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            cli.output_dir.display()
        )
    })?;
    let inputs = ReportInputs {
        dataset: &dataset,
        by_key: &by_key,
        by_date: &by_date,
        by_key_date: &by_key_date,
        headline: &headline,
        ratios: ratios.as_ref(),
    };
    let outcome = emit_artifacts(&cli.output_dir, &inputs);
    if !cli.quiet {
        for name in &outcome.succeeded {
            print_success(&format!("Wrote {name}"));
        }
    }
    for (name, reason) in &outcome.failed {
        print_warning(&format!("Skipped {name}: {reason}"));
    }

    let summary = RunSummary {
        rows_loaded,
        rows_kept: dataset.len(),
        clean: clean_report,
        quality_skipped: violations.len(),
        undefined_ratios: ratios.as_ref().map_or(0, |r| r.undefined),
        artifacts_written: outcome.succeeded,
        artifacts_failed: outcome.failed,
    };
    if !cli.quiet {
        summary.display();
        print_info(&format!("Finished in {:.2?}", run_start.elapsed()));
        print_completion();
    }

    Ok(())
}

fn schema_label(arg: SchemaArg) -> &'static str {
    match arg {
        SchemaArg::Auto => "auto-detect",
        SchemaArg::Sales => "sales",
        SchemaArg::Epidemic => "epidemic",
    }
}
