//! Display formatting for terminal output
//!
//! Provides utilities for formatting movements and summaries for the CLI.

pub mod format;
pub mod movement;

pub use format::{format_money_colored, truncate};
pub use movement::{
    format_balance, format_month_list, format_movement_line, format_movement_table,
    format_summary,
};
