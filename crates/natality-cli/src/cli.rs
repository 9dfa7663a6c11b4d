//! CLI argument definitions for the natality pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "natality",
    version,
    about = "Normalize regional indicator and birth tabulation sources into one comparison table",
    long_about = "Reconcile multi-year human-development indicator exports and \
                  birth tabulations stratified by maternal age into a single \
                  analysis-ready CSV, plus the two normalized per-source tables."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
    /// Normalize the sources in a folder and write the comparison outputs.
    Run(RunArgs),

    /// List the canonical age brackets.
    Brackets,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Folder containing indicator and birth tabulation source files.
    #[arg(value_name = "SOURCES_DIR")]
    pub sources_dir: PathBuf,

    /// Output directory for generated files (default: <SOURCES_DIR>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// JSON file overriding the built-in filename -> year tables.
    #[arg(long = "year-config", value_name = "PATH")]
    pub year_config: Option<PathBuf>,

    /// Load and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Age bracket for the summary correlation against the education
    /// sub-index (canonical label, e.g. "15-19").
    #[arg(long = "corr-bracket", value_name = "LABEL", default_value = "15-19")]
    pub corr_bracket: String,
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
