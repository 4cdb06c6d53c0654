//! CLI argument definitions for tbx2sheet.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "tbx2sheet",
    version,
    about = "Convert TBX terminology files to spreadsheets",
    long_about = "Convert TermBase eXchange (TBX) terminology files to spreadsheets.\n\n\
                  Every field found in the document can be selected and renamed;\n\
                  each language gets its own columns. Writes XLSX or CSV."
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
    /// Convert a TBX file to a spreadsheet.
    Convert(ConvertArgs),

    /// List the fields found in a TBX file.
    Fields(FieldsArgs),
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Path to the TBX file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file (default: <INPUT> with the format's extension).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format (default: from the output extension, else xlsx).
    #[arg(long = "format", value_enum)]
    pub format: Option<OutputFormatArg>,

    /// Use every field under its original name without prompting.
    #[arg(long = "auto")]
    pub auto: bool,

    /// Read the field selection from a TOML file (takes precedence over --auto).
    #[arg(long = "selection", value_name = "FILE")]
    pub selection: Option<PathBuf>,

    /// Save the field selection used for this run to a TOML file.
    #[arg(long = "save-selection", value_name = "FILE")]
    pub save_selection: Option<PathBuf>,

    /// Row layout: one row per entry or one row per entry and language.
    #[arg(long = "layout", value_enum, default_value = "per-entry")]
    pub layout: LayoutArg,

    /// Separator for repeated values of one field within a term.
    #[arg(long = "separator", value_name = "STR", default_value = "; ")]
    pub separator: String,

    /// Print a conversion summary (always shown after interactive selection).
    #[arg(short = 's', long = "summary")]
    pub summary: bool,

    /// Run every stage without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct FieldsArgs {
    /// Path to the TBX file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Print the catalog as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Xlsx,
    Csv,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LayoutArg {
    PerEntry,
    PerLanguage,
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
