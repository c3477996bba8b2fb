//! Simple line-based CLI output utilities.

use crate::view_models::{Notice, ViewError};

/// Line width for separators.
pub const LINE_WIDTH: usize = 60;

/// Print a page header.
///
/// ```text
/// AVAILABLE BOOKS
/// ════════════════════════════════════════════════════════════
/// ```
pub fn print_header(title: &str) {
    println!();
    println!("{}", title);
    println!("{}", "═".repeat(LINE_WIDTH));
}

/// Print a thin separator.
pub fn print_rule() {
    println!("{}", "─".repeat(LINE_WIDTH));
}

/// Print an indented line with a status icon.
///
/// ```text
///   ✓ Book borrowed
/// ```
pub fn print_status_line(icon: &str, message: &str) {
    println!("  {} {}", icon, message);
}

/// Print pre-formatted lines.
pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

/// The one-line form of a notice.
pub fn notice_line(notice: &Notice) -> String {
    let icon = match notice {
        Notice::Success(_) => icons::SUCCESS,
        Notice::Failure(_) => icons::FAILURE,
    };
    format!("  {} {}", icon, notice.message())
}

pub fn print_notice(notice: &Notice) {
    println!("{}", notice_line(notice));
}

/// Print a failed view. Unauthorized failures get a hint to log in again.
pub fn print_view_error(error: &ViewError) {
    print_status_line(icons::FAILURE, &error.message);
    if error.requires_login() {
        println!();
        println!("    Your session is missing or has expired.");
        println!("    Run `libris login <username>` and try again.");
    }
}

/// Status icons
pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const FAILURE: &str = "✗";
    pub const WARNING: &str = "⚠";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_line() {
        assert_eq!(
            notice_line(&Notice::Success("Book borrowed".to_string())),
            "  ✓ Book borrowed"
        );
        assert_eq!(
            notice_line(&Notice::Failure("Not available".to_string())),
            "  ✗ Not available"
        );
    }
}
