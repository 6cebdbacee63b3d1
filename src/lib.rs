//! chaincli - chained subcommand dispatcher
//!
//! Splits one argument list into several command invocations, so a single
//! process call can run `start -p 8080 test --cov seed init.sql`. Each
//! command keeps its own `clap` parser; the dispatcher only decides which
//! tokens belong to which command, instantiates every command, then runs
//! them in order.

// Note: deny (not forbid) to allow #[allow(unsafe_code)] in test helpers for env var manipulation
#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod core;
pub mod error;
pub mod render;
pub mod storage;
pub mod util;

/// Test utilities module - included in test builds or when test-utils feature is enabled.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use crate::cli::{ChainCli, ChainCliBuilder};
pub use crate::core::{
    Chain, ChainCommand, CommandDefinition, InvocationRecord, InvokedCommand, KeySlot, Outcome,
    Runnable,
};
pub use crate::error::{ChainError, ExitCode, Result};

// Re-export test utilities for external test crates
#[cfg(any(test, feature = "test-utils"))]
pub use test_utils::*;
