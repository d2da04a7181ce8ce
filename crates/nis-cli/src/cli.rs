//! CLI argument definitions for the `nis` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use nis_validate::ValidationMode;

#[derive(Parser)]
#[command(
    name = "nis",
    version,
    about = "Clean NIS vaccination coverage extracts into one canonical table",
    long_about = "Clean raw National Immunization Survey coverage extracts.\n\n\
                  Each dataset id has its own cleaning pipeline. The cleaned table\n\
                  is validated and written as CSV in the canonical column order."
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
    /// Clean one raw CSV extract.
    Clean(CleanArgs),

    /// List the dataset ids that have a cleaning pipeline.
    Datasets(DatasetsArgs),
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Raw CSV extract, as downloaded.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Dataset id selecting the cleaning pipeline (for example `ker6-gs6z`).
    #[arg(long = "dataset", short = 'd', value_name = "ID")]
    pub dataset: String,

    /// Output CSV path (default: `<INPUT_DIR>/<ID>_clean.csv`).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// What to do with data-quality problems in the cleaned table.
    #[arg(long = "validation", value_name = "MODE", default_value = "warn")]
    pub validation: ValidationMode,

    /// JSON file of dataset pipelines used instead of the built-in ones.
    #[arg(long = "registry", value_name = "PATH")]
    pub registry: Option<PathBuf>,

    /// Clean and validate without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct DatasetsArgs {
    /// JSON file of dataset pipelines used instead of the built-in ones.
    #[arg(long = "registry", value_name = "PATH")]
    pub registry: Option<PathBuf>,
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
