//! CLI argument definitions for the catalog validator.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "catalog-validator",
    version,
    about = "Validate product catalog extracts against catalog data rules",
    long_about = "Validate a product catalog spreadsheet or CSV extract.\n\n\
                  Runs file format, data format, completeness, uniqueness, URL,\n\
                  length and identifier checks and writes a JSON report. Every\n\
                  data format occurrence can be exported to an xlsx fail report."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a catalog file and write the JSON report.
    Validate(ValidateArgs),

    /// Validate and export every data format occurrence to an xlsx file.
    ExportFails(ExportArgs),

    /// List the canonical properties and the rule groups that check them.
    Properties,
}

/// Inputs shared by every command that validates a file.
#[derive(Args)]
pub struct InputArgs {
    /// Catalog file (.xlsx, .xlsm, .xls, .xlsb, .ods or .csv).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Validate this sheet instead of the active one.
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,

    /// JSON mapping file; headers are matched to properties when omitted.
    #[arg(long = "mapping", value_name = "PATH")]
    pub mapping: Option<PathBuf>,

    /// Extra identifier column to check like SKU or EAN (repeatable).
    #[arg(long = "extra-id", value_name = "NAME")]
    pub extra_ids: Vec<String>,
}

#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// JSON report path (default: <FILE stem>_report.json next to FILE).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Also export the data format fail report to this xlsx path.
    #[arg(long = "fail-report", value_name = "PATH")]
    pub fail_report: Option<PathBuf>,

    /// Print the summary without writing the JSON report.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Fail report path (default: <FILE stem>_fails.xlsx next to FILE).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
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
