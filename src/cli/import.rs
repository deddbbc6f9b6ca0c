//! CLI commands for importing movements

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_movement_line;
use crate::error::GastosResult;
use crate::models::MonthKey;
use crate::services::{CsvImportService, PayslipImportService};
use crate::storage::Storage;

/// Import subcommands
#[derive(Subcommand, Debug)]
pub enum ImportCommands {
    /// Import the net pay of a payslip PDF as income
    Pdf {
        /// Path to the PDF file
        file: PathBuf,
        /// Month to record it in (YYYY-MM); defaults to the current month
        #[arg(short, long)]
        month: Option<MonthKey>,
    },

    /// Import movements from a CSV file in the month-file layout
    Csv {
        /// Path to the CSV file
        file: PathBuf,
        /// Put every row in this month instead of its own (YYYY-MM)
        #[arg(short, long)]
        month: Option<MonthKey>,
    },
}

/// Handle import commands
pub fn handle_import_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ImportCommands,
) -> GastosResult<()> {
    match cmd {
        ImportCommands::Pdf { file, month } => {
            let month = month.unwrap_or_else(MonthKey::current);
            let result = PayslipImportService::new(storage, settings).import(&file, &month)?;

            println!(
                "Imported payslip into {} (found by {}):",
                result.month, result.strategy
            );
            println!(
                "  {}",
                format_movement_line(&result.movement, &settings.currency_symbol)
            );
        }
        ImportCommands::Csv { file, month } => {
            let result = CsvImportService::new(storage).import(&file, month)?;

            println!(
                "Imported {} movement(s) from {}",
                result.imported_count(),
                file.display()
            );
            for (month, movements) in &result.imported {
                println!("  {}: {}", month, movements.len());
            }

            if !result.skipped.is_empty() {
                println!("Skipped {} row(s):", result.skipped.len());
                for row in &result.skipped {
                    println!("  line {}: {}", row.line, row.reason);
                }
            }
        }
    }

    Ok(())
}
