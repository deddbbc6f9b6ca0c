//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod export;
pub mod import;
pub mod movement;

pub use audit::handle_audit_command;
pub use export::{handle_export_command, ExportCommands};
pub use import::{handle_import_command, ImportCommands};
pub use movement::{
    handle_add_command, handle_balance_command, handle_delete_command, handle_list_command,
    handle_months_command, handle_summary_command, AddArgs, AddCommands,
};
