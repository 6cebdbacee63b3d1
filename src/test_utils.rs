//! Test utilities for chaincli.
//!
//! Provides recording commands, temp directories, environment guards and
//! assertion macros for use across all test modules.
//!
//! # Usage
//!
//! ```rust,ignore
//! use chaincli::test_utils::*;
//!
//! let log = RunLog::default();
//! let cli = ChainCli::builder()
//!     .command(recording_command("start", &log))
//!     .build()?;
//! cli.run(["start"])?;
//! assert_eq!(log.entries(), ["start"]);
//! ```

use std::fs;
use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::core::{CommandDefinition, Runnable};

// =============================================================================
// Recording Commands
// =============================================================================

/// Shared log of command runs, in run order.
#[derive(Debug, Clone, Default)]
pub struct RunLog {
    inner: Arc<Mutex<Vec<String>>>,
}

impl RunLog {
    /// Append an entry.
    pub fn record(&self, entry: impl Into<String>) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry.into());
    }

    /// Snapshot of all entries.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// A command that records its label, and its raw arguments when it was
/// built with a parser that accepts them, then succeeds.
#[derive(Debug)]
pub struct RecordingCommand {
    label: String,
    args: Vec<String>,
    log: RunLog,
}

impl RecordingCommand {
    /// Arguments collected by the parser.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl Runnable for RecordingCommand {
    fn run(&mut self) -> anyhow::Result<()> {
        if self.args.is_empty() {
            self.log.record(self.label.clone());
        } else {
            self.log
                .record(format!("{} {}", self.label, self.args.join(" ")));
        }
        Ok(())
    }
}

/// A command that fails when run.
#[derive(Debug)]
pub struct FailingCommand {
    message: String,
}

impl Runnable for FailingCommand {
    fn run(&mut self) -> anyhow::Result<()> {
        anyhow::bail!("{}", self.message)
    }
}

/// Register `key` as a command that records `key` into `log` when run.
///
/// The command's parser accepts no arguments.
#[must_use]
pub fn recording_command(key: &'static str, log: &RunLog) -> CommandDefinition {
    let log = log.clone();
    CommandDefinition::new(key, move |_| {
        Ok(RecordingCommand {
            label: key.to_string(),
            args: Vec::new(),
            log: log.clone(),
        })
    })
}

/// Like [`recording_command`] but the parser takes any number of
/// positional arguments, which are recorded after the key.
#[must_use]
pub fn recording_command_with_args(key: &'static str, log: &RunLog) -> CommandDefinition {
    let log = log.clone();
    let parser = clap::Command::new(key).arg(
        clap::Arg::new("args")
            .num_args(0..)
            .allow_hyphen_values(true)
            .trailing_var_arg(true),
    );
    CommandDefinition::new(key, move |matches| {
        let args = matches
            .get_many::<String>("args")
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        Ok(RecordingCommand {
            label: key.to_string(),
            args,
            log: log.clone(),
        })
    })
    .parser(parser)
}

/// Register `key` as a command whose run fails with `message`.
#[must_use]
pub fn failing_command(key: &'static str, message: &'static str) -> CommandDefinition {
    CommandDefinition::new(key, move |_| {
        Ok(FailingCommand {
            message: message.to_string(),
        })
    })
}

// =============================================================================
// Temp Directory
// =============================================================================

/// An isolated temporary directory removed on drop.
pub struct TestDir {
    inner: tempfile::TempDir,
}

impl TestDir {
    /// Create a new isolated temporary directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: tempfile::tempdir().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the temporary directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    /// Create a file with the given content, creating parent directories.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be created or written.
    pub fn create_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.inner.path().join(name);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        let mut file = fs::File::create(&path).expect("Failed to create test file");
        file.write_all(content.as_bytes())
            .expect("Failed to write test file");
        path
    }

    /// Read a file from the temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn read_file(&self, name: &str) -> io::Result<String> {
        fs::read_to_string(self.inner.path().join(name))
    }

    /// Get the full path to a file in the temporary directory.
    #[must_use]
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.inner.path().join(name)
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Environment
// =============================================================================

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Sets environment variables for the guard's lifetime.
///
/// Holds a process-wide lock so tests touching the environment do not
/// interleave. Prior values are restored on drop.
pub struct EnvGuard {
    prior: Vec<(String, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvGuard {
    /// Apply `vars`; `None` removes the variable.
    #[allow(unsafe_code)]
    #[must_use]
    pub fn set(vars: &[(&str, Option<&str>)]) -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let mut prior = Vec::with_capacity(vars.len());
        for (key, value) in vars {
            prior.push(((*key).to_string(), std::env::var(key).ok()));
            // SAFETY: ENV_LOCK serializes environment access in tests.
            unsafe {
                match value {
                    Some(val) => std::env::set_var(key, val),
                    None => std::env::remove_var(key),
                }
            }
        }
        Self { prior, _lock: lock }
    }
}

impl Drop for EnvGuard {
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        for (key, value) in self.prior.drain(..).rev() {
            // SAFETY: the lock is still held.
            unsafe {
                match value {
                    Some(val) => std::env::set_var(&key, val),
                    None => std::env::remove_var(&key),
                }
            }
        }
    }
}

// =============================================================================
// Assertion Macros
// =============================================================================

/// Assert that a string contains a substring.
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        let haystack = $haystack;
        let needle = $needle;
        assert!(
            haystack.contains(needle),
            "Expected string to contain {:?}\n\nActual string:\n{:?}",
            needle,
            haystack
        );
    };
}

/// Assert that a string does NOT contain a substring.
#[macro_export]
macro_rules! assert_not_contains {
    ($haystack:expr, $needle:expr) => {
        let haystack = $haystack;
        let needle = $needle;
        assert!(
            !haystack.contains(needle),
            "Expected string NOT to contain {:?}\n\nActual string:\n{:?}",
            needle,
            haystack
        );
    };
}

// =============================================================================
// Test Helpers
// =============================================================================

/// Sample config file content.
#[must_use]
pub fn make_test_config_toml() -> String {
    r#"[general]
name = "Backend Project"
generate_help = true
enable_chaining = false

[logging]
level = "debug"
format = "compact"
"#
    .to_string()
}
