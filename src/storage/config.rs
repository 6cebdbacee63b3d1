//! Configuration file loading.
//!
//! Loads configuration from `<config dir>/chaincli/config.toml`
//! (e.g. `~/.config/chaincli/config.toml` on Linux).
//!
//! ## Precedence
//!
//! Settings are resolved with the following precedence (highest first):
//! 1. Explicit `ChainCliBuilder` calls
//! 2. Environment variables
//! 3. Config file
//! 4. Built-in defaults
//!
//! ## Environment Variables
//!
//! - `CHAINCLI_NAME`: Interface name shown in help
//! - `CHAINCLI_CHAINING`: Enable command chaining (1/0, true/false, yes/no, on/off)
//! - `CHAINCLI_GENERATE_HELP`: Enable `-h`/`--help` on the primary command
//! - `CHAINCLI_LOG`, `CHAINCLI_LOG_FORMAT`, `CHAINCLI_LOG_FILE`: see `core::logging`
//! - `CHAINCLI_CONFIG`: Override config file path

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::AppPaths;
use crate::core::logging::{self, LogFormat, LogLevel};
use crate::error::{ChainError, Result};

/// Environment variable for the interface name.
pub const ENV_NAME: &str = "CHAINCLI_NAME";
/// Environment variable for chaining.
pub const ENV_CHAINING: &str = "CHAINCLI_CHAINING";
/// Environment variable for help generation.
pub const ENV_GENERATE_HELP: &str = "CHAINCLI_GENERATE_HELP";
/// Environment variable to override config file path.
pub const ENV_CONFIG: &str = "CHAINCLI_CONFIG";

/// Default interface name.
pub const DEFAULT_NAME: &str = "Chain CLI";

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Configuration after merging env vars, config file and defaults.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Interface name used in help output.
    pub name: String,
    /// Whether `-h`/`--help` on the primary command renders generated help.
    pub generate_help: bool,
    /// Whether several commands may be chained.
    pub enable_chaining: bool,
    /// Log level.
    pub log_level: LogLevel,
    /// Log format.
    pub log_format: LogFormat,
    /// Log file, stderr when unset.
    pub log_file: Option<PathBuf>,
    /// Source of each setting for debugging.
    pub sources: ConfigSources,
}

/// Tracks the source of each configuration value.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    pub name: ConfigSource,
    pub generate_help: ConfigSource,
    pub enable_chaining: ConfigSource,
    pub log_level: ConfigSource,
}

/// Where a configuration value came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Value from environment variable.
    Env,
    /// Value from config file.
    ConfigFile,
    /// Built-in default.
    #[default]
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Env => write!(f, "environment variable"),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

impl ResolvedConfig {
    /// Resolve configuration from the config file and environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but is invalid.
    pub fn resolve() -> Result<Self> {
        let config = match std::env::var(ENV_CONFIG) {
            Ok(path) => Config::load_from(Path::new(&path))?,
            Err(_) => Config::load()?,
        };
        Self::resolve_with(&config)
    }

    /// Resolve against an already loaded config file.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails validation.
    pub fn resolve_with(config: &Config) -> Result<Self> {
        config.validate()?;
        let mut sources = ConfigSources::default();

        let name = Self::resolve_name(config, &mut sources.name);
        let generate_help = Self::resolve_flag(
            ENV_GENERATE_HELP,
            config.general.generate_help,
            &mut sources.generate_help,
        );
        let enable_chaining = Self::resolve_flag(
            ENV_CHAINING,
            config.general.enable_chaining,
            &mut sources.enable_chaining,
        );
        let log_level = Self::resolve_log_level(config, &mut sources.log_level);
        let log_format = logging::parse_log_format_from_env()
            .or_else(|| config.logging.format.as_deref().and_then(LogFormat::from_arg))
            .unwrap_or_default();
        let log_file =
            logging::parse_log_file_from_env().or_else(|| config.logging.file.clone());

        Ok(Self {
            name,
            generate_help,
            enable_chaining,
            log_level,
            log_format,
            log_file,
            sources,
        })
    }

    fn resolve_name(config: &Config, source: &mut ConfigSource) -> String {
        if let Some(name) = std::env::var(ENV_NAME)
            .ok()
            .filter(|value| !value.trim().is_empty())
        {
            *source = ConfigSource::Env;
            return name;
        }

        if let Some(name) = &config.general.name {
            *source = ConfigSource::ConfigFile;
            return name.clone();
        }

        DEFAULT_NAME.to_string()
    }

    fn resolve_flag(env: &str, file_value: Option<bool>, source: &mut ConfigSource) -> bool {
        if let Some(value) = std::env::var(env).ok().and_then(|v| parse_bool(&v)) {
            *source = ConfigSource::Env;
            return value;
        }

        if let Some(value) = file_value {
            *source = ConfigSource::ConfigFile;
            return value;
        }

        true
    }

    fn resolve_log_level(config: &Config, source: &mut ConfigSource) -> LogLevel {
        if let Some(level) = logging::parse_log_level_from_env() {
            *source = ConfigSource::Env;
            return level;
        }

        if let Some(level) = config.logging.level.as_deref().and_then(LogLevel::from_arg) {
            *source = ConfigSource::ConfigFile;
            return level;
        }

        LogLevel::default()
    }
}

/// Parse a truthy/falsy setting. Unrecognised values yield `None`.
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// =============================================================================
// Config File
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dispatcher settings.
    pub general: GeneralConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Dispatcher settings.
///
/// Unset fields fall back to the built-in defaults at resolution time, so a
/// value written in the file counts as coming from the file even when it
/// equals the default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Interface name used in help output.
    pub name: Option<String>,
    /// Whether `-h`/`--help` on the primary command renders generated help.
    pub generate_help: Option<bool>,
    /// Whether several commands may be chained.
    pub enable_chaining: Option<bool>,
}

/// Logging settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: Option<String>,
    /// Log format (human, json, compact).
    pub format: Option<String>,
    /// Log file path.
    pub file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default config file path.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().config_file())
    }

    /// Load configuration from a specific path.
    ///
    /// Returns default config if the file doesn't exist.
    /// Returns error only if the file exists but is invalid.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        tracing::debug!(?path, "Loading config file");
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ChainError::ConfigParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self
            .general
            .name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return Err(ChainError::Config("Interface name must not be empty".to_string()));
        }

        if let Some(level) = &self.logging.level {
            if LogLevel::from_arg(level).is_none() {
                return Err(ChainError::Config(format!(
                    "Invalid log level \"{level}\". Valid levels: trace, debug, info, warn, error"
                )));
            }
        }

        if let Some(format) = &self.logging.format {
            if LogFormat::from_arg(format).is_none() {
                return Err(ChainError::Config(format!(
                    "Invalid log format \"{format}\". Valid formats: human, json, compact"
                )));
            }
        }

        Ok(())
    }
}
