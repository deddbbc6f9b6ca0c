//! CLI commands for data export

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::Settings;
use crate::error::GastosResult;
use crate::export::{export_month, ExportFormat};
use crate::models::MonthKey;
use crate::storage::Storage;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export a month to CSV (same layout as the month files)
    Csv {
        /// Output file path
        output: PathBuf,
        /// Month to export (YYYY-MM); defaults to the current month
        #[arg(short, long)]
        month: Option<MonthKey>,
    },

    /// Export a month to an Excel workbook
    Xlsx {
        /// Output file path
        output: PathBuf,
        /// Month to export (YYYY-MM); defaults to the current month
        #[arg(short, long)]
        month: Option<MonthKey>,
    },
}

/// Handle export commands
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExportCommands,
) -> GastosResult<()> {
    let (format, output, month) = match cmd {
        ExportCommands::Csv { output, month } => (ExportFormat::Csv, output, month),
        ExportCommands::Xlsx { output, month } => (ExportFormat::Xlsx, output, month),
    };
    let month = month.unwrap_or_else(MonthKey::current);

    let rows = export_month(storage, &month, format, &output, &settings.currency_symbol)?;
    println!(
        "Exported {} movement(s) of {} to: {}",
        rows,
        month,
        output.display()
    );

    Ok(())
}
