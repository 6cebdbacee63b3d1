//! Environment detection utilities.

use std::io::IsTerminal;

/// Check if stderr is a TTY.
#[must_use]
pub fn stderr_is_tty() -> bool {
    std::io::stderr().is_terminal()
}

/// Check if diagnostics on stderr should be colored.
///
/// Stdout belongs to the chained commands, so only stderr is inspected.
#[must_use]
pub fn should_use_color(no_color_flag: bool) -> bool {
    if no_color_flag {
        return false;
    }

    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var("TERM").is_ok_and(|t| t == "dumb") {
        return false;
    }

    stderr_is_tty()
}
