//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "freight",
    version,
    about = "Outbound freight cost analyzer",
    long_about = "Consolidate carrier shipping invoices (FedEx, UPS, USPS) into a canonical\n\
                  shipment set, reconcile shipments against order data, and compute the\n\
                  quantity-weighted average shipping cost per product category."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for humans, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Process an invoice period folder and produce the cost analysis.
    Analyze(AnalyzeArgs),

    /// Print the vendor alias tables in effect.
    Vendors,
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Folder containing the period's carrier invoice CSV exports.
    #[arg(value_name = "INVOICE_DIR")]
    pub invoice_dir: PathBuf,

    /// Order feed CSV covering the same timeframe.
    #[arg(long = "orders", value_name = "PATH")]
    pub orders: PathBuf,

    /// Output directory for the analysis CSV and QC report
    /// (default: <INVOICE_DIR>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// JSON file overriding the built-in vendor field maps.
    #[arg(long = "field-maps", value_name = "PATH")]
    pub field_maps: Option<PathBuf>,

    /// Half-width in days of the order-date window for fuzzy matching.
    #[arg(long = "date-window", default_value_t = 2)]
    pub date_window: u64,

    /// Name similarity at or above which a fuzzy match is high confidence.
    #[arg(long = "high-threshold", default_value_t = 0.85)]
    pub high_threshold: f64,

    /// Name similarity below which a candidate is discarded.
    #[arg(long = "low-threshold", default_value_t = 0.65)]
    pub low_threshold: f64,

    /// Also attribute costs from low-confidence fuzzy matches.
    #[arg(long = "include-fuzzy-low")]
    pub include_fuzzy_low: bool,

    /// How gift bags weigh in the cost-per-product denominator.
    #[arg(long = "gift-bag", value_enum, default_value = "full")]
    pub gift_bag: GiftBagArg,

    /// Days added to each side of the invoice span for the order query.
    #[arg(long = "buffer-days", default_value_t = 60)]
    pub buffer_days: u64,

    /// Run the analysis and print the summary without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum GiftBagArg {
    /// Gift bags count as full units.
    Full,
    /// Gift bags are excluded from the denominator.
    Excluded,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
