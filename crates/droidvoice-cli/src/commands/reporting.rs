//! Shared console formatting.

use chrono::{SecondsFormat, Utc};
use colored::Colorize;
use droidvoice_spec::ValidationWarning;

/// Formats a byte count as kilobytes with one decimal.
pub(crate) fn format_kb(bytes: u64) -> String {
    format!("{:.1}KB", bytes as f64 / 1024.0)
}

/// Formats a byte count as megabytes with two decimals.
pub(crate) fn format_mb(bytes: u64) -> String {
    format!("{:.2}MB", bytes as f64 / 1024.0 / 1024.0)
}

/// Formats the per-clip result line, e.g. `-> happy_01.wav (4.2KB, 0.3s)`.
pub(crate) fn clip_line(file_name: &str, size_bytes: u64, duration_seconds: f64) -> String {
    format!(
        "-> {} ({}, {:.1}s)",
        file_name,
        format_kb(size_bytes),
        duration_seconds
    )
}

/// Prints validation warnings to stderr.
pub(crate) fn print_warnings(warnings: &[ValidationWarning]) {
    for warning in warnings {
        eprintln!("{} {}", "WARN".yellow().bold(), warning);
    }
}

/// Prints a cyan banner.
pub(crate) fn print_banner(title: &str) {
    println!("{}", "======================================".cyan());
    println!("{}", format!("  {}", title).cyan());
    println!("{}", "======================================".cyan());
}

/// Returns the current UTC time as an RFC 3339 timestamp, e.g.
/// `2026-10-19T08:30:00Z`.
pub(crate) fn utc_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
