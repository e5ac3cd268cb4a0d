//! Unified output formatting utilities for consistent CLI presentation.
//!
//! This module provides standardized formatting functions for all gitcli
//! output, ensuring consistent colors, symbols and spacing across handlers.
//!
//! # Design Principles
//! - **Consistent color scheme**: Red for errors, green for success, yellow for
//!   warnings, cyan for informational text and hints
//! - **One symbol per message kind**: `✕`, `✓`, `!`, `›`
//! - **Plain text preserved**: tests match on the message text, not the styling

use colored::*;

/// Width of section rules
pub const RULE_WIDTH: usize = 60;

/// Formats and prints an error message with consistent styling
///
/// # Format
/// ```text
/// ✕ <message>
/// ```
pub fn print_error(message: &str) {
    println!("{} {}", "✕".red(), message.red());
}

/// Formats and prints a success message with consistent styling
///
/// # Format
/// ```text
/// ✓ <message>
/// ```
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message.green());
}

/// Formats and prints a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "!".yellow().bold(), message.yellow());
}

/// Formats and prints an informational message
pub fn print_info(message: &str) {
    println!("{}", message.cyan());
}

/// Formats and prints a hint pointing the user at a follow-up command
pub fn print_hint(message: &str) {
    println!("{} {}", "›".bright_black(), message.bright_black());
}

/// Formats and prints a section header with consistent styling
///
/// # Format
/// ```text
///
/// <header>
/// ------------------------------------------------------------
/// ```
pub fn print_section_header(header: &str) {
    println!("\n{}", header.cyan().bold());
    print_rule();
}

/// Prints a horizontal rule
pub fn print_rule() {
    println!("{}", "-".repeat(RULE_WIDTH).bright_black());
}

/// Prints a numbered menu, one option per line
///
/// # Format
/// ```text
///   1. <option>
///   2. <option>
/// ```
pub fn print_menu(options: &[&str]) {
    for (i, option) in options.iter().enumerate() {
        println!("  {}. {}", (i + 1).to_string().bright_black(), option);
    }
}
