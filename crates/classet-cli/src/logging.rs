//! Subscriber setup for the `classet` binary.
//!
//! The library crates only emit `tracing` events. Levels used across the
//! workspace:
//!
//! - `error`: failed commands
//! - `warn`: overwritten duplicate schema labels
//! - `info`: command progress
//! - `debug`: acquisitions and state transitions
//! - `trace`: normalized enable/disable sets

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::{self, format::FmtSpan, writer::BoxMakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

const WORKSPACE_CRATES: [&str; 3] = ["classet_cli", "classet_core", "classet_model"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Full single-line records.
    #[default]
    Pretty,
    /// Abbreviated records.
    Compact,
    /// Newline-delimited JSON objects.
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LogDestination {
    #[default]
    Stderr,
    /// Append to a file, creating it when missing.
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Ceiling for events from workspace crates. Other crates stay at warn.
    pub level: LevelFilter,
    /// Use `RUST_LOG` instead of `level` when the variable is set.
    pub honor_rust_log: bool,
    pub timestamps: bool,
    pub targets: bool,
    /// Emit span close events. Only the JSON format records them.
    pub span_events: bool,
    pub ansi: bool,
    pub format: LogFormat,
    pub destination: LogDestination,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new(LevelFilter::WARN)
    }
}

impl LogConfig {
    pub fn new(level: LevelFilter) -> Self {
        Self {
            level,
            honor_rust_log: true,
            timestamps: false,
            targets: false,
            span_events: true,
            ansi: true,
            format: LogFormat::Pretty,
            destination: LogDestination::Stderr,
        }
    }

    #[must_use]
    pub fn honor_rust_log(mut self, honor: bool) -> Self {
        self.honor_rust_log = honor;
        self
    }

    #[must_use]
    pub fn with_timestamps(mut self, timestamps: bool) -> Self {
        self.timestamps = timestamps;
        self
    }

    #[must_use]
    pub fn with_targets(mut self, targets: bool) -> Self {
        self.targets = targets;
        self
    }

    #[must_use]
    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_destination(mut self, destination: LogDestination) -> Self {
        self.destination = destination;
        self
    }

    /// Filter directives used when `RUST_LOG` is ignored or unset.
    pub fn directives(&self) -> String {
        let level = self.level.to_string().to_lowercase();
        let mut directives = String::from("warn");
        for name in WORKSPACE_CRATES {
            directives.push_str(&format!(",{name}={level}"));
        }
        directives
    }

    fn env_filter(&self) -> EnvFilter {
        if self.honor_rust_log
            && let Ok(filter) = EnvFilter::try_from_default_env()
        {
            return filter;
        }
        EnvFilter::new(self.directives())
    }

    fn writer(&self) -> Result<BoxMakeWriter> {
        match &self.destination {
            LogDestination::Stderr => Ok(BoxMakeWriter::new(std::io::stderr)),
            LogDestination::File(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("open log file {}", path.display()))?;
                Ok(BoxMakeWriter::new(Mutex::new(file)))
            }
        }
    }

    fn fmt_layer(&self, writer: BoxMakeWriter) -> Box<dyn Layer<Registry> + Send + Sync> {
        let base = fmt::layer::<Registry>()
            .with_writer(writer)
            .with_target(self.targets);
        match (self.format, self.timestamps) {
            (LogFormat::Json, _) => {
                let spans = if self.span_events {
                    FmtSpan::CLOSE
                } else {
                    FmtSpan::NONE
                };
                base.json().with_span_events(spans).boxed()
            }
            (LogFormat::Compact, true) => base.with_ansi(self.ansi).compact().boxed(),
            (LogFormat::Compact, false) => {
                base.with_ansi(self.ansi).compact().without_time().boxed()
            }
            (LogFormat::Pretty, true) => base.with_ansi(self.ansi).boxed(),
            (LogFormat::Pretty, false) => base.with_ansi(self.ansi).without_time().boxed(),
        }
    }
}

/// Install the global subscriber. Fails when the log file cannot be opened or
/// a subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let layer = config.fmt_layer(config.writer()?);
    tracing_subscriber::registry()
        .with(layer)
        .with(config.env_filter())
        .try_init()
        .context("install tracing subscriber")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_raise_only_workspace_crates() {
        let config = LogConfig::new(LevelFilter::DEBUG);
        assert_eq!(
            config.directives(),
            "warn,classet_cli=debug,classet_core=debug,classet_model=debug"
        );
    }

    #[test]
    fn builders_replace_fields() {
        let config = LogConfig::default()
            .with_format(LogFormat::Json)
            .honor_rust_log(false)
            .with_timestamps(true)
            .with_targets(true)
            .with_destination(LogDestination::File(PathBuf::from("classet.log")));
        assert_eq!(config.format, LogFormat::Json);
        assert!(!config.honor_rust_log);
        assert!(config.timestamps && config.targets);
        assert_eq!(
            config.destination,
            LogDestination::File(PathBuf::from("classet.log"))
        );
    }

    #[test]
    fn unwritable_log_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nested").join("out.log");
        let config = LogConfig::default().with_destination(LogDestination::File(missing));
        let err = config.writer().err().expect("writer should fail");
        assert!(format!("{err:#}").contains("open log file"));
    }
}
