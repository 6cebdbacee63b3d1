//! The chained command-line interface facade.

pub mod app;

pub use app::{ChainCli, ChainCliBuilder};
