//! `classet` binary entry point.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::{ColorChoice, Parser};
use classet_cli::logging::{LogConfig, LogDestination, init_logging};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command};
use crate::commands::{run_apply_command, run_schema};

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(error) = init_logging(&log_config(&cli)) {
        eprintln!("error: {error:#}");
        return ExitCode::FAILURE;
    }
    let result = match &cli.command {
        Command::Apply(args) => run_apply_command(args),
        Command::Schema(args) => run_schema(args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error:#}");
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

/// An explicit `--log-level` wins over `-v`/`-q`; either one disables `RUST_LOG`.
fn log_config(cli: &Cli) -> LogConfig {
    let explicit = cli.log_level.map(LevelFilter::from);
    let level = explicit.unwrap_or_else(|| cli.verbosity.tracing_level_filter());
    let destination = cli
        .log_file
        .clone()
        .map_or(LogDestination::Stderr, LogDestination::File);
    let ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => destination == LogDestination::Stderr && io::stderr().is_terminal(),
    };
    LogConfig::new(level)
        .honor_rust_log(explicit.is_none() && !cli.verbosity.is_present())
        .with_format(cli.log_format.into())
        .with_timestamps(cli.log_timestamps)
        .with_targets(cli.log_targets)
        .with_ansi(ansi)
        .with_destination(destination)
}
