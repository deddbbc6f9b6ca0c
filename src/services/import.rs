//! CSV import service
//!
//! Reads a file in the month-file layout (for example a previous CSV export)
//! and appends its movements to the month of each row, or to one forced
//! month.

use std::collections::BTreeMap;
use std::path::Path;

use csv::ReaderBuilder;

use crate::audit::AuditEntry;
use crate::error::{GastosError, GastosResult};
use crate::models::{MonthKey, Movement};
use crate::storage::ledger::{record_to_movement, HEADER};
use crate::storage::{MalformedRow, Storage};

/// Result of a CSV import
#[derive(Debug, Clone, Default)]
pub struct CsvImportResult {
    /// Imported movements grouped by the month they went into
    pub imported: BTreeMap<MonthKey, Vec<Movement>>,
    /// Rows that could not be read
    pub skipped: Vec<MalformedRow>,
}

impl CsvImportResult {
    pub fn imported_count(&self) -> usize {
        self.imported.values().map(Vec::len).sum()
    }
}

/// Service for importing movements from CSV files
pub struct CsvImportService<'a> {
    storage: &'a Storage,
}

impl<'a> CsvImportService<'a> {
    /// Create a new import service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Parse a CSV file without writing anything
    pub fn parse_file(
        &self,
        path: &Path,
    ) -> GastosResult<(Vec<Movement>, Vec<MalformedRow>)> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(|e| {
                GastosError::Import(format!("Failed to open {}: {}", path.display(), e))
            })?;

        let headers = reader.headers()?.clone();
        let header_matches = headers.len() == HEADER.len()
            && headers
                .iter()
                .zip(HEADER)
                .all(|(found, expected)| found.trim().eq_ignore_ascii_case(expected));
        if !header_matches {
            return Err(GastosError::Import(format!(
                "Unexpected header in {}: expected {}",
                path.display(),
                HEADER.join(",")
            )));
        }

        let mut movements = Vec::new();
        let mut skipped = Vec::new();

        for result in reader.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            match record_to_movement(&record) {
                Ok(movement) => movements.push(movement),
                Err(reason) => {
                    log::warn!("{}:{}: skipping row: {}", path.display(), line, reason);
                    skipped.push(MalformedRow {
                        line,
                        fields: record.iter().map(str::to_string).collect(),
                        reason,
                    });
                }
            }
        }

        Ok((movements, skipped))
    }

    /// Import a CSV file
    ///
    /// Each movement goes to the month of its timestamp unless `month` forces
    /// one target month.
    pub fn import(&self, path: &Path, month: Option<MonthKey>) -> GastosResult<CsvImportResult> {
        let (movements, skipped) = self.parse_file(path)?;
        let mut result = CsvImportResult {
            skipped,
            ..Default::default()
        };

        for movement in movements {
            let target = month.unwrap_or_else(|| MonthKey::of_timestamp(movement.timestamp));
            self.storage.ledger.append(&target, &movement)?;
            result.imported.entry(target).or_default().push(movement);
        }

        let source = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        for (target, imported) in &result.imported {
            self.storage.log_entry(&AuditEntry::import(
                target.to_string(),
                source.clone(),
                imported,
                format!("{} rows from CSV", imported.len()),
            ))?;
        }

        log::info!(
            "Imported {} movements from {} ({} skipped)",
            result.imported_count(),
            path.display(),
            result.skipped.len()
        );

        Ok(result)
    }
}
