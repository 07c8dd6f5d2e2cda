//! Unified output formatting utilities for consistent CLI presentation.
//!
//! This module provides standardized formatting functions for all kotobaten output,
//! ensuring consistent colors, spacing, and message structure across commands.
//!
//! # Design Principles
//! - **Consistent color scheme**: Red for errors, green for success, cyan for notifications
//! - **Standardized spacing**: Newline before and after multi-line command outputs
//! - **Single-line notifications**: The `next`/`previous` summaries fit a HUD line

use colored::*;

/// Formats and prints an error message with consistent styling
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
///
/// # Colors
/// - "✕ Error:" in red
/// - Message in white
/// - Newlines before and after for spacing
pub fn print_error(message: &str) {
    println!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// Formats and prints a success message with consistent styling
///
/// # Format
/// ```text
///
/// ✓ <message>
/// ```
pub fn print_success(message: &str) {
    println!("\n{} {}", "✓".green(), message.white());
}

/// Formats and prints an informational message with consistent styling
pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

/// Formats and prints a section header with consistent styling
///
/// # Format
/// ```text
///
/// <header>:
///
/// ```
pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.white());
}

/// A transient one-line notification, printed without surrounding blank lines.
pub fn print_notification(message: &str) {
    println!("{}", message.cyan());
}

/// `[<label>] <text>` with a muted label, used for list entries.
pub fn format_entry(label: &str, text: &str) -> String {
    format!("{} {}", format!("[{label}]").bright_black(), text.white())
}
