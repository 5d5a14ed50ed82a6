//! Formatting functions for terminal output.
//!
//! Human-oriented lines go to stderr so that stdout carries only the values a CI
//! script captures. Colors are dropped automatically when stderr is not a terminal.

use console::StyledObject;

use crate::domain::Version;

fn style<D>(value: D) -> StyledObject<D> {
    console::style(value).for_stderr()
}

/// Format an error message with a red prefix.
pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red(), message)
}

/// Format a success message with a green checkmark.
pub fn format_success(message: &str) -> String {
    format!("{} {}", style("✓").green(), message)
}

/// Format a status message with a yellow arrow.
pub fn format_status(message: &str) -> String {
    format!("{} {}", style("→").yellow(), message)
}

/// Format a warning with a yellow warning sign.
pub fn format_warning(message: &str) -> String {
    format!("{} {}", style("⚠ WARNING:").yellow(), message)
}

/// Format an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message));
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{}", format_success(message));
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{}", format_status(message));
}

/// Format and print a warning.
pub fn display_warning(message: &str) {
    eprintln!("{}", format_warning(message));
}

/// Print the version as a bare line on stdout, for capture by CI scripts.
pub fn display_version(version: &Version) {
    println!("{}", version);
}

/// Display the change of the stored version.
///
/// # Arguments
/// * `old` - Previously stored version (None if it could not be read)
/// * `new` - The version that was written
pub fn display_version_change(old: Option<&Version>, new: &Version) {
    match old {
        Some(old) if old == new => {
            eprintln!("{} {}", style("Project version unchanged:").bold(), style(new).green());
        }
        Some(old) => {
            eprintln!("{}", style("Project version change:").bold());
            eprintln!("  From: {}", style(old).red());
            eprintln!("  To:   {}", style(new).green());
        }
        None => {
            eprintln!("{} {}", style("Project version set:").bold(), style(new).green());
        }
    }
}
