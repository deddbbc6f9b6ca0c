//! Formatting helpers for terminal output

use crate::models::Money;

/// Format a money amount with the currency symbol and color hints
pub fn format_money_colored(amount: Money, symbol: &str) -> String {
    let text = amount.format_with_symbol(symbol);
    if amount.is_negative() {
        format!("\x1b[31m{}\x1b[0m", text) // Red for negative
    } else {
        format!("\x1b[32m{}\x1b[0m", text)
    }
}

/// Format a section header with an underline
pub fn format_header(title: &str, width: usize) -> String {
    format!("{}\n{}\n", title, separator(width))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
