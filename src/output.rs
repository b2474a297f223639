//! Colored console output for release checks
//!
//! Uses owo-colors for terminal colors. Printing is split from formatting so
//! tests can assert on rendered strings without a terminal.

use owo_colors::OwoColorize;

/// Severity of a console message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Notice,
    Warning,
    Error,
}

/// Render a message with its color escapes, without printing it.
pub fn render(level: Level, message: &str) -> String {
    match level {
        Level::Notice => format!("{}", message.green()),
        Level::Warning => format!("{}", message.yellow()),
        Level::Error => format!("{}", message.red()),
    }
}

/// Print a notice (green) to stdout.
/// Example: "downloading https://... to package.tar.gz"
pub fn notice(message: &str) {
    println!("{}", render(Level::Notice, message));
}

/// Print a warning (yellow) to stdout.
pub fn warning(message: &str) {
    println!("{}", render(Level::Warning, message));
}

/// Print an error (red) to stderr.
///
/// Does not exit: the binary entry point decides the process status.
pub fn error(message: &str) {
    eprintln!("{}", render(Level::Error, message));
}
