//! Error types for chaincli.
//!
//! Uses `thiserror` for structured error types that map to exit codes.
//!
//! ## Error Taxonomy
//!
//! - **Definition**: a command's key slots could not be resolved at registry build
//! - **Invocation**: the chain referenced an unknown key, or a command's parser rejected its arguments
//! - **Command**: a command failed to instantiate or to run
//! - **Configuration**: config file parsing or validation
//! - **Internal**: I/O and other unclassified failures
//!
//! Each error has a stable error code (e.g., `CHAIN-K001`) for programmatic handling.

use thiserror::Error;

// =============================================================================
// Error Categories
// =============================================================================

/// High-level error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Command definitions that cannot be registered.
    Definition,
    /// Problems turning a chain record into a parsed invocation.
    Invocation,
    /// A command failed while being constructed or run.
    Command,
    /// Configuration issues (parse errors, invalid values).
    Configuration,
    /// Internal errors (I/O, unexpected state).
    Internal,
}

impl ErrorCategory {
    /// Returns a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Definition => "Command definition error",
            Self::Invocation => "Invocation error",
            Self::Command => "Command error",
            Self::Configuration => "Configuration error",
            Self::Internal => "Internal error",
        }
    }

    /// Returns a short code prefix for this category.
    #[must_use]
    pub const fn code_prefix(&self) -> &'static str {
        match self {
            Self::Definition => "K",
            Self::Invocation => "I",
            Self::Command => "R",
            Self::Configuration => "C",
            Self::Internal => "X",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

// =============================================================================
// Exit Codes
// =============================================================================

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success (also used after help output)
    Success = 0,
    /// A command failed, or an unexpected failure
    GeneralError = 1,
    /// Argument errors (same status clap uses)
    UsageError = 2,
    /// Invalid configuration or command definitions
    ConfigError = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as Self
    }
}

/// Main error type for chaincli operations.
#[derive(Error, Debug)]
pub enum ChainError {
    /// A command's primary key slot did not resolve to a usable string.
    #[error("invalid key definition for command {command}: {reason}")]
    InvalidKeyDefinition { command: String, reason: String },

    /// A chain record references a key that is not registered.
    #[error("unknown invocation key: {0}")]
    UnknownInvocationKey(String),

    /// A process argument is not valid Unicode.
    #[error("argument {index} is not valid UTF-8: {lossy}")]
    InvalidArgument { index: usize, lossy: String },

    /// The command's own parser rejected its arguments (or asked for help).
    ///
    /// Displayed exactly as clap formats it.
    #[error("{source}")]
    Parse {
        key: String,
        #[source]
        source: clap::Error,
    },

    /// The command's factory could not build an instance from parsed arguments.
    #[error("failed to construct command '{key}': {source}")]
    Instantiate {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// A command returned an error from `run`.
    #[error("command '{key}' failed: {source}")]
    Run {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Invalid configuration value.
    #[error("configuration error: {0}")]
    Config(String),

    /// Config file exists but is not valid TOML for the expected schema.
    #[error("config parse error at {path}: {message}")]
    ConfigParse { path: String, message: String },

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChainError {
    /// Map error to process exit code.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Parse { source, .. } if !source.use_stderr() => ExitCode::Success,
            Self::Parse { .. } | Self::InvalidArgument { .. } => ExitCode::UsageError,
            Self::InvalidKeyDefinition { .. } | Self::Config(_) | Self::ConfigParse { .. } => {
                ExitCode::ConfigError
            }
            Self::UnknownInvocationKey(_)
            | Self::Instantiate { .. }
            | Self::Run { .. }
            | Self::Io(_) => ExitCode::GeneralError,
        }
    }

    /// Returns the error category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidKeyDefinition { .. } => ErrorCategory::Definition,
            Self::UnknownInvocationKey(_) | Self::InvalidArgument { .. } | Self::Parse { .. } => {
                ErrorCategory::Invocation
            }
            Self::Instantiate { .. } | Self::Run { .. } => ErrorCategory::Command,
            Self::Config(_) | Self::ConfigParse { .. } => ErrorCategory::Configuration,
            Self::Io(_) => ErrorCategory::Internal,
        }
    }

    /// Returns a stable error code for programmatic handling.
    ///
    /// Format: `CHAIN-{category}{number}`.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidKeyDefinition { .. } => "CHAIN-K001",
            Self::UnknownInvocationKey(_) => "CHAIN-I001",
            Self::Parse { .. } => "CHAIN-I002",
            Self::InvalidArgument { .. } => "CHAIN-I003",
            Self::Instantiate { .. } => "CHAIN-R001",
            Self::Run { .. } => "CHAIN-R002",
            Self::Config(_) => "CHAIN-C001",
            Self::ConfigParse { .. } => "CHAIN-C002",
            Self::Io(_) => "CHAIN-X001",
        }
    }

    /// Returns the invocation key this error concerns, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Parse { key, .. } | Self::Instantiate { key, .. } | Self::Run { key, .. } => {
                Some(key)
            }
            Self::UnknownInvocationKey(key) => Some(key),
            _ => None,
        }
    }

    /// One-line fix hint shown under the error message.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::InvalidKeyDefinition { command, .. } => Some(format!(
                "give {command} a non-empty literal key or a key function that returns Some"
            )),
            Self::UnknownInvocationKey(_) => Some(
                "the chain was modified after tokenizing; rebuild it from the registry".to_string(),
            ),
            Self::Config(_) | Self::ConfigParse { .. } => {
                Some(format!("check the file pointed to by {}", crate::storage::config::ENV_CONFIG))
            }
            Self::Instantiate { key, .. } => Some(format!("run {key} -h for more information")),
            Self::InvalidArgument { .. } => {
                Some("pass file names and values as UTF-8 text".to_string())
            }
            Self::Parse { .. } | Self::Run { .. } | Self::Io(_) => None,
        }
    }
}

/// Result type alias for chaincli operations.
pub type Result<T> = std::result::Result<T, ChainError>;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_error(kind: clap::error::ErrorKind) -> ChainError {
        ChainError::Parse {
            key: "start".to_string(),
            source: clap::Error::new(kind),
        }
    }

    #[test]
    fn error_category_code_prefix() {
        assert_eq!(ErrorCategory::Definition.code_prefix(), "K");
        assert_eq!(ErrorCategory::Invocation.code_prefix(), "I");
        assert_eq!(ErrorCategory::Command.code_prefix(), "R");
        assert_eq!(ErrorCategory::Configuration.code_prefix(), "C");
        assert_eq!(ErrorCategory::Internal.code_prefix(), "X");
    }

    #[test]
    fn error_codes_match_category_prefix() {
        let errors = vec![
            ChainError::InvalidKeyDefinition {
                command: "BadKey".to_string(),
                reason: "empty".to_string(),
            },
            ChainError::UnknownInvocationKey("ghost".to_string()),
            parse_error(clap::error::ErrorKind::UnknownArgument),
            ChainError::Run {
                key: "start".to_string(),
                source: anyhow::anyhow!("port in use"),
            },
            ChainError::Config("bad".to_string()),
            ChainError::Io(std::io::Error::other("disk")),
        ];

        for err in errors {
            let code = err.error_code();
            let expected = format!("CHAIN-{}", err.category().code_prefix());
            assert!(code.starts_with(&expected), "{code} should start with {expected}");
        }
    }

    #[test]
    fn exit_codes_are_correct() {
        assert_eq!(
            ChainError::InvalidKeyDefinition {
                command: "X".to_string(),
                reason: "r".to_string()
            }
            .exit_code(),
            ExitCode::ConfigError
        );
        assert_eq!(
            ChainError::UnknownInvocationKey("x".to_string()).exit_code(),
            ExitCode::GeneralError
        );
        assert_eq!(
            parse_error(clap::error::ErrorKind::UnknownArgument).exit_code(),
            ExitCode::UsageError
        );
        assert_eq!(
            parse_error(clap::error::ErrorKind::DisplayHelp).exit_code(),
            ExitCode::Success
        );
    }

    #[test]
    fn key_is_reported_for_invocation_errors() {
        assert_eq!(
            ChainError::UnknownInvocationKey("ghost".to_string()).key(),
            Some("ghost")
        );
        assert_eq!(ChainError::Config("x".to_string()).key(), None);
    }

    #[test]
    fn run_error_message_names_command() {
        let err = ChainError::Run {
            key: "seed".to_string(),
            source: anyhow::anyhow!("file missing"),
        };
        assert_eq!(err.to_string(), "command 'seed' failed: file missing");
    }

    #[test]
    fn invalid_argument_is_a_usage_error() {
        let err = ChainError::InvalidArgument {
            index: 2,
            lossy: "f\u{fffd}.sql".to_string(),
        };
        assert_eq!(err.exit_code(), ExitCode::UsageError);
        assert_eq!(err.error_code(), "CHAIN-I003");
        assert_eq!(err.to_string(), "argument 2 is not valid UTF-8: f\u{fffd}.sql");
    }

    #[test]
    fn definition_error_has_hint() {
        let err = ChainError::InvalidKeyDefinition {
            command: "BadKey".to_string(),
            reason: "resolved to an empty string".to_string(),
        };
        assert!(err.hint().is_some_and(|h| h.contains("BadKey")));
    }
}
