//! Outbound freight cost analyzer CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

use freight_cli::cli::{Cli, Command, LogFormatArg};
use freight_cli::commands::{run_analyze, run_vendors};
use freight_cli::logging::{LogConfig, LogFormat, init_logging};
use freight_cli::summary::print_summary;
use freight_core::PipelineError;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Analyze(args) => match run_analyze(&args) {
            Ok(result) => {
                print_summary(&result.output);
                if let Some(path) = &result.aggregate_path {
                    println!("Analysis: {}", path.display());
                }
                if let Some(path) = &result.report_path {
                    println!("QC report: {}", path.display());
                }
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                // An unavailable order feed is an infrastructure failure,
                // not a data problem; give it its own exit code.
                if error.downcast_ref::<PipelineError>().is_some() {
                    2
                } else {
                    1
                }
            }
        },
        Command::Vendors => match run_vendors() {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !cli.verbosity.is_present();
    if config.level_filter == LevelFilter::OFF {
        config.use_env_filter = false;
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
