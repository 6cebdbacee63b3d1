//! Error rendering for chaincli.
//!
//! Argument errors are left to clap, which formats them itself. Everything
//! else is rendered as a one-line header with the stable error code,
//! followed by a hint when one exists.

use colored::Colorize;

use crate::error::ChainError;

/// Render an error for stderr.
///
/// Colors are used only when [`should_use_color`](crate::util::should_use_color)
/// allows it.
#[must_use]
pub fn render_error(error: &ChainError, no_color: bool) -> String {
    if let ChainError::Parse { source, .. } = error {
        return source.to_string();
    }

    if crate::util::should_use_color(no_color) {
        render_colored(error)
    } else {
        render_plain(error)
    }
}

fn render_plain(error: &ChainError) -> String {
    let mut lines = vec![format!("error[{}]: {}", error.error_code(), error)];
    if let Some(hint) = error.hint() {
        lines.push(format!("  hint: {hint}"));
    }
    lines.join("\n")
}

fn render_colored(error: &ChainError) -> String {
    let header = format!("error[{}]", error.error_code()).red().bold();
    let mut lines = vec![format!("{header}: {error}")];
    if let Some(hint) = error.hint() {
        lines.push(format!("  {} {hint}", "hint:".cyan()));
    }
    lines.join("\n")
}
