//! Structured logging to stderr.
//!
//! Chained commands own stdout, so log events always go to stderr (or to
//! a log file) and default to `error` level.

use std::fs::OpenOptions;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

pub const LOG_LEVEL_ENV: &str = "CHAINCLI_LOG";
pub const LOG_FORMAT_ENV: &str = "CHAINCLI_LOG_FORMAT";
pub const LOG_FILE_ENV: &str = "CHAINCLI_LOG_FILE";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable logs.
    #[default]
    Human,
    /// JSON logs (one event per line).
    Json,
    /// Compact logs (single line, terse).
    Compact,
}

impl LogFormat {
    /// Parse from string (case-insensitive).
    #[must_use]
    pub fn from_arg(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "human" => Some(Self::Human),
            "json" => Some(Self::Json),
            "compact" => Some(Self::Compact),
            _ => None,
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    #[default]
    Error,
}

impl LogLevel {
    /// Parse from string (case-insensitive).
    #[must_use]
    pub fn from_arg(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "verbose" | "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Convert to tracing filter string.
    #[must_use]
    pub const fn as_filter(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Convert to tracing level.
    #[must_use]
    pub const fn as_tracing_level(self) -> Level {
        match self {
            Self::Trace => Level::TRACE,
            Self::Debug => Level::DEBUG,
            Self::Info => Level::INFO,
            Self::Warn => Level::WARN,
            Self::Error => Level::ERROR,
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Parse log level from `CHAINCLI_LOG`.
#[must_use]
pub fn parse_log_level_from_env() -> Option<LogLevel> {
    non_empty_env(LOG_LEVEL_ENV).and_then(|value| LogLevel::from_arg(&value))
}

/// Parse log format from `CHAINCLI_LOG_FORMAT`.
#[must_use]
pub fn parse_log_format_from_env() -> Option<LogFormat> {
    non_empty_env(LOG_FORMAT_ENV).and_then(|value| LogFormat::from_arg(&value))
}

/// Parse log file path from `CHAINCLI_LOG_FILE`.
#[must_use]
pub fn parse_log_file_from_env() -> Option<PathBuf> {
    non_empty_env(LOG_FILE_ENV).map(PathBuf::from)
}

/// Initialize logging with the given settings.
///
/// Does nothing if a global subscriber is already installed.
pub fn init(level: LogLevel, format: LogFormat, log_file: Option<PathBuf>) {
    let file = log_file.and_then(|path| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .ok()
    });

    let make_writer = || -> BoxMakeWriter {
        match file.as_ref().and_then(|inner| inner.try_clone().ok()) {
            Some(file) => BoxMakeWriter::new(file),
            None => BoxMakeWriter::new(std::io::stderr),
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("chaincli={}", level.as_filter())));

    match format {
        LogFormat::Json => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .with_writer(make_writer())
                .with_span_events(FmtSpan::CLOSE)
                .try_init()
                .ok();
        }
        LogFormat::Compact => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .compact()
                .with_writer(make_writer())
                .with_target(true)
                .try_init()
                .ok();
        }
        LogFormat::Human => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(make_writer())
                .with_target(false)
                .without_time()
                .try_init()
                .ok();
        }
    }
}
