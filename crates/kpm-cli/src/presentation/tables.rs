//! Table formatting utilities for CLI output.

/// Truncates a string to a maximum length, adding "..." if needed.
///
/// Counts characters, not bytes, so multi-byte names never split.
///
/// ```rust
/// use kpm_cli::presentation::truncate_string;
///
/// assert_eq!(truncate_string("stripe", 10), "stripe");
/// assert_eq!(truncate_string("email-notifications", 8), "email...");
/// ```
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Print a horizontal separator line.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

/// Format an optional value for table display, returning `default` if unset
/// or empty.
pub fn format_optional(value: Option<&str>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_string()
}
