//! Terminal User Interface module
//!
//! Interactive month view built on ratatui: browse months, search, add and
//! delete movements, import payslips and export the month.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub use app::App;
pub use terminal::run_tui;
