//! Tracing subscriber setup for the command-line tool.
//!
//! The level comes from `--log-level`, then `REGALG_LOG_LEVEL`, then
//! `RUST_LOG`, and defaults to `warn` so that normal output stays clean.
//! The format comes from `--log-format`, then `REGALG_LOG_FORMAT`, and
//! defaults to `compact`.
//!
//! Library events can be filtered per module with the usual directive
//! syntax:
//!
//! ```bash
//! REGALG_LOG_LEVEL="warn,regalg::automaton::minimize=trace" regalg dot '(a|b)*ab'
//! ```

use anyhow::{Result, anyhow};
use std::str::FromStr;
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Log format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact single-line format
    Compact,
    /// Pretty multi-line format with colors
    Pretty,
    /// JSON format for log aggregation
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// Resolve the filter directive from the flag or the environment.
fn resolve_level(level: Option<&str>) -> String {
    level
        .map(str::to_string)
        .or_else(|| std::env::var("REGALG_LOG_LEVEL").ok())
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "warn".to_string())
}

/// Resolve the output format from the flag or the environment.
fn resolve_format(format: Option<LogFormat>) -> Result<LogFormat> {
    if let Some(format) = format {
        return Ok(format);
    }
    match std::env::var("REGALG_LOG_FORMAT") {
        Ok(name) => LogFormat::from_str(&name).map_err(|e| anyhow!("Invalid log format: {}", e)),
        Err(_) => Ok(LogFormat::Compact),
    }
}

/// Install the global subscriber. Events go to stderr.
///
/// Fails if the level is not a valid filter directive, the format is
/// unknown, or a subscriber is already installed.
pub fn init_logging(level: Option<&str>, format: Option<LogFormat>) -> Result<()> {
    let level = resolve_level(level);
    let filter = EnvFilter::try_new(&level).map_err(|e| anyhow!("Invalid log level {level:?}: {e}"))?;

    match resolve_format(format)? {
        LogFormat::Compact => Registry::default()
            .with(filter)
            .with(
                fmt::Layer::default()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_level(true)
                    .with_span_events(FmtSpan::NONE)
                    .compact(),
            )
            .try_init()?,
        LogFormat::Pretty => Registry::default()
            .with(filter)
            .with(
                fmt::Layer::default()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_span_events(FmtSpan::ACTIVE)
                    .pretty(),
            )
            .try_init()?,
        LogFormat::Json => Registry::default()
            .with(filter)
            .with(
                fmt::Layer::default()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .json(),
            )
            .try_init()?,
    }

    Ok(())
}
