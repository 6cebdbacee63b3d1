//! Common test utilities for integration tests.
//!
//! # Modules
//!
//! - `backend`: the sample backend project commands, with run tracking
//! - `log_capture`: tracing layer that records events for assertions

pub mod backend;
pub mod log_capture;
