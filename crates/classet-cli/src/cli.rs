//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use classet_cli::logging::LogFormat;

#[derive(Parser)]
#[command(
    name = "classet",
    version,
    about = "Track class labels under a schema of mutually exclusive groups",
    long_about = "Track class labels under a schema of mutually exclusive groups.\n\n\
                  Schemas are JSON: either an ordered list of {\"name\", \"group\"} records\n\
                  or an object mapping labels to groups. Updates are JSON values: a label,\n\
                  a list of labels, an object of label -> bool, or null to clear."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -vvv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log level for classet crates. Takes precedence over -v/-q and RUST_LOG.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log record format: pretty and compact for people, json for log pipelines.
    #[arg(long, value_enum, default_value_t = LogFormatArg::Pretty, global = true)]
    pub log_format: LogFormatArg,

    /// Prefix log records with a timestamp.
    #[arg(long, global = true)]
    pub log_timestamps: bool,

    /// Include the emitting module path in log records.
    #[arg(long, global = true)]
    pub log_targets: bool,

    /// Append logs to PATH rather than stderr.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Acquire a class state, apply updates, and print the serialized result.
    Apply(ApplyArgs),

    /// Print the labels, groups, and precedence of a schema.
    Schema(SchemaArgs),
}

#[derive(Parser)]
pub struct ApplyArgs {
    /// JSON schema file. Without it, labels are free-form and never exclude each other.
    #[arg(long, value_name = "PATH")]
    pub schema: Option<PathBuf>,

    /// Reject schemas that declare a label more than once.
    #[arg(long)]
    pub strict: bool,

    /// Label to enable at acquisition (repeatable).
    #[arg(long, value_name = "LABEL")]
    pub init: Vec<String>,

    /// JSON update applied as one call (repeatable, applied in order).
    #[arg(long = "update", value_name = "JSON")]
    pub updates: Vec<String>,

    /// Print a JSON summary instead of the serialized classes.
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct SchemaArgs {
    /// JSON schema file.
    #[arg(value_name = "PATH")]
    pub schema: PathBuf,

    /// Reject schemas that declare a label more than once.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
