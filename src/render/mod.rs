//! Diagnostic rendering.

pub mod error;

pub use error::render_error;
