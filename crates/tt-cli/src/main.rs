//! ttc: timetable batches and conflicts.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;
use tt_cli::logging::{LogConfig, LogFormat, init_logging};

mod cli;
mod commands;
mod summary;
mod types;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_batches, run_check, run_roster, run_scan};
use crate::summary::{print_batches_summary, print_check_summary, print_roster_report, print_scan};

/// Exit code when `--fail-on-conflict` is set and conflicts were found.
const CONFLICT_EXIT_CODE: i32 = 2;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let config = cli.config.as_deref();
    let exit_code = match &cli.command {
        Command::Batches(args) => match run_batches(args, config) {
            Ok(result) => {
                print_batches_summary(&result);
                i32::from(!result.errors.is_empty())
            }
            Err(error) => report(&error),
        },
        Command::Check(args) => match run_check(args, config) {
            Ok(result) => {
                print_check_summary(&result);
                if !result.errors.is_empty() {
                    1
                } else if args.fail_on_conflict && !result.outcome.detection.is_clean() {
                    CONFLICT_EXIT_CODE
                } else {
                    0
                }
            }
            Err(error) => report(&error),
        },
        Command::Roster(args) => match run_roster(args, config) {
            Ok(report) => {
                print_roster_report(&report);
                0
            }
            Err(error) => report(&error),
        },
        Command::Scan(args) => match run_scan(args) {
            Ok(entries) => {
                print_scan(&entries);
                0
            }
            Err(error) => report(&error),
        },
    };
    std::process::exit(exit_code);
}

fn report(error: &anyhow::Error) -> i32 {
    eprintln!("error: {error:#}");
    1
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        log_data: cli.log_data,
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
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
