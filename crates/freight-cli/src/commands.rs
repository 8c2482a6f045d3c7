//! Command implementations.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use freight_analysis::AggregationConfig;
use freight_core::{ExtractOptions, PipelineConfig, RunOutput, run_pipeline};
use freight_ingest::discover_invoice_files;
use freight_map::VendorFieldMaps;
use freight_match::MatchConfig;
use freight_model::GiftBagWeighting;

use crate::cli::{AnalyzeArgs, GiftBagArg};
use crate::export::{prepare_output_dir, write_aggregate_csv, write_report_json};
use crate::orders::CsvOrderFeed;

/// A completed analyze run plus where its artifacts went.
pub struct AnalyzeResult {
    pub output: RunOutput,
    pub aggregate_path: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
}

pub fn run_analyze(args: &AnalyzeArgs) -> Result<AnalyzeResult> {
    let maps = load_field_maps(args)?;
    let files = discover_invoice_files(&args.invoice_dir)
        .with_context(|| format!("discover invoices in {}", args.invoice_dir.display()))?;
    info!(files = files.len(), dir = %args.invoice_dir.display(), "discovered invoice files");

    let feed = CsvOrderFeed::new(&args.orders);
    let config = pipeline_config(args);
    let output = run_pipeline(&files, &maps, &feed, &config)?;

    if args.dry_run {
        info!("dry run; skipping output files");
        return Ok(AnalyzeResult {
            output,
            aggregate_path: None,
            report_path: None,
        });
    }

    let out_dir = prepare_output_dir(&args.invoice_dir, args.output_dir.as_deref())?;
    let aggregate_path = out_dir.join("shipping_cost_analysis.csv");
    write_aggregate_csv(
        &aggregate_path,
        &output.aggregate,
        output.averages.as_ref(),
    )?;
    let report_path = out_dir.join("run_report.json");
    write_report_json(&report_path, &output.report)?;
    info!(
        aggregate = %aggregate_path.display(),
        report = %report_path.display(),
        "analysis written"
    );

    Ok(AnalyzeResult {
        output,
        aggregate_path: Some(aggregate_path),
        report_path: Some(report_path),
    })
}

/// Prints the alias tables the run would use.
pub fn run_vendors() -> Result<()> {
    let maps = VendorFieldMaps::builtin();
    for map in maps.iter() {
        println!("{}", map.vendor);
        for entry in &map.fields {
            let aliases = entry.aliases.join(" | ");
            let required = if map.required.contains(&entry.field) {
                " (required)"
            } else {
                ""
            };
            println!("  {}{required}  <-  {aliases}", entry.field);
        }
        println!();
    }
    Ok(())
}

fn load_field_maps(args: &AnalyzeArgs) -> Result<VendorFieldMaps> {
    match &args.field_maps {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("read field maps {}", path.display()))?;
            VendorFieldMaps::from_json(&json)
                .with_context(|| format!("parse field maps {}", path.display()))
        }
        None => Ok(VendorFieldMaps::builtin()),
    }
}

fn pipeline_config(args: &AnalyzeArgs) -> PipelineConfig {
    let mut aggregation = AggregationConfig {
        gift_bag: match args.gift_bag {
            GiftBagArg::Full => GiftBagWeighting::Full,
            GiftBagArg::Excluded => GiftBagWeighting::Excluded,
        },
        ..AggregationConfig::default()
    };
    if args.include_fuzzy_low {
        aggregation = aggregation.including_fuzzy_low();
    }
    PipelineConfig {
        extract: ExtractOptions::default(),
        matching: MatchConfig {
            date_window_days: args.date_window,
            high_threshold: args.high_threshold,
            low_threshold: args.low_threshold,
            ..MatchConfig::default()
        },
        aggregation,
        order_buffer_days: args.buffer_days,
        ..PipelineConfig::default()
    }
}
