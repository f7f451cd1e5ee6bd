//! CLI argument definitions for `ttc`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "ttc",
    version,
    about = "Timetable batches & conflicts - form practical batches and find clashes",
    long_about = "Form fixed-size batches from subject rosters and check a weekly timetable\n\
                  for students booked into two sessions at once.\n\n\
                  Reads CSV and spreadsheet files (xlsx, xls, xlsm, ods); writes CSV or JSON."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
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

    /// Include student identifiers in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Options file (default: ./ttc.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Form batches from one or more subject rosters.
    Batches(BatchesArgs),

    /// Check a timetable for student conflicts and suggest fixes.
    Check(CheckArgs),

    /// Show how a roster file is normalized.
    Roster(RosterArgs),

    /// List roster files in a directory.
    Scan(ScanArgs),
}

/// Options shared by commands that form batches.
#[derive(Args, Debug, Clone, Default)]
pub struct BatchingArgs {
    /// Students per batch (default 30).
    #[arg(long = "batch-size", value_name = "N")]
    pub batch_size: Option<usize>,

    /// Batch code format.
    #[arg(long = "code-style", value_enum)]
    pub code_style: Option<CodeStyleArg>,
}

#[derive(Args)]
pub struct BatchesArgs {
    /// Roster files; the subject is the file name unless a subject column exists.
    #[arg(value_name = "ROSTER", required = true)]
    pub rosters: Vec<PathBuf>,

    /// Read subjects from this column instead of "subject code".
    #[arg(long = "subject-column", value_name = "NAME")]
    pub subject_column: Option<String>,

    #[command(flatten)]
    pub batching: BatchingArgs,

    /// Output file (default: ./batch_allocation.<format>).
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "csv")]
    pub format: ExportFormatArg,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Timetable file (direct subject/day/time rows or a class-time grid).
    #[arg(long = "timetable", value_name = "FILE")]
    pub timetable: PathBuf,

    /// Subject allocation (enrollments) for direct timetables.
    #[arg(long = "allocation", value_name = "FILE")]
    pub allocation: Option<PathBuf>,

    /// Subject rosters for grid timetables; batches are formed from them.
    #[arg(long = "roster", value_name = "FILE")]
    pub rosters: Vec<PathBuf>,

    #[command(flatten)]
    pub batching: BatchingArgs,

    /// Directory for conflict and resolution tables.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "csv")]
    pub format: ExportFormatArg,

    /// What to do with rows whose day or time cannot be parsed.
    #[arg(long = "on-bad-time", value_enum)]
    pub on_bad_time: Option<BadTimeArg>,

    /// Exit with status 2 when conflicts are found.
    #[arg(long = "fail-on-conflict")]
    pub fail_on_conflict: bool,
}

#[derive(Args)]
pub struct RosterArgs {
    /// Roster file to inspect.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Args)]
pub struct ScanArgs {
    /// Directory holding roster files.
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CodeStyleArg {
    /// EC301 + 1 -> EC3011
    Concatenated,
    /// EC301 + 1 -> EC301_B1
    Separated,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ExportFormatArg {
    Csv,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum BadTimeArg {
    /// Skip the row with a warning.
    Skip,
    /// Stop with an error.
    Fail,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<CodeStyleArg> for tt_model::BatchCodeStyle {
    fn from(value: CodeStyleArg) -> Self {
        match value {
            CodeStyleArg::Concatenated => tt_model::BatchCodeStyle::Concatenated,
            CodeStyleArg::Separated => tt_model::BatchCodeStyle::Separated,
        }
    }
}

impl From<ExportFormatArg> for tt_output::OutputFormat {
    fn from(value: ExportFormatArg) -> Self {
        match value {
            ExportFormatArg::Csv => tt_output::OutputFormat::Csv,
            ExportFormatArg::Json => tt_output::OutputFormat::Json,
        }
    }
}

impl From<BadTimeArg> for tt_model::MalformedTimePolicy {
    fn from(value: BadTimeArg) -> Self {
        match value {
            BadTimeArg::Skip => tt_model::MalformedTimePolicy::Skip,
            BadTimeArg::Fail => tt_model::MalformedTimePolicy::Fail,
        }
    }
}
