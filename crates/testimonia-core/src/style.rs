//! ANSI styling for terminal log output.
//!
//! Used by the HTTP log formatter and the SQL statement highlighter. Only the
//! classification of a value is contractual; the escape codes themselves are
//! cosmetic.

pub const RED: &str = "\u{1b}[31m";
pub const GREEN: &str = "\u{1b}[32m";
pub const YELLOW: &str = "\u{1b}[33m";
pub const BLUE: &str = "\u{1b}[34m";
pub const MAGENTA: &str = "\u{1b}[35m";
pub const CYAN: &str = "\u{1b}[36m";
pub const WHITE: &str = "\u{1b}[37m";
pub const GRAY: &str = "\u{1b}[90m";

const RESET: &str = "\u{1b}[0m";

/// Wrap `text` in the given color code.
pub fn paint(color: &str, text: &str) -> String {
    format!("{color}{text}{RESET}")
}
