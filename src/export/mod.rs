//! Export module for gastos
//!
//! Writes one month to a user-chosen file:
//! - CSV: same layout as the month files, importable again
//! - XLSX: styled spreadsheet for sharing

pub mod csv;
pub mod xlsx;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub use self::csv::export_month_csv;
pub use self::xlsx::export_month_xlsx;

use crate::audit::AuditEntry;
use crate::error::{GastosError, GastosResult};
use crate::models::MonthKey;
use crate::storage::Storage;

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    /// Conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }

    /// Default output file name for a month
    pub fn default_file_name(&self, month: &MonthKey) -> String {
        format!("movimientos_{}.{}", month, self.extension())
    }
}

/// Export `month` to `path`, recording it in the audit log
///
/// Returns the number of movements written.
pub fn export_month(
    storage: &Storage,
    month: &MonthKey,
    format: ExportFormat,
    path: &Path,
    currency_symbol: &str,
) -> GastosResult<usize> {
    let ledger = storage.ledger.read_month(month)?;
    if ledger.is_empty() {
        return Err(GastosError::Export(format!("No data to export for {}", month)));
    }

    let rows = match format {
        ExportFormat::Csv => {
            let file = File::create(path).map_err(|e| {
                GastosError::Export(format!("Cannot create {}: {}", path.display(), e))
            })?;
            export_month_csv(&ledger, BufWriter::new(file))?
        }
        ExportFormat::Xlsx => export_month_xlsx(&ledger, path, currency_symbol)?,
    };

    storage.log_entry(&AuditEntry::export(
        month.to_string(),
        path.display().to_string(),
        rows,
    ))?;

    log::info!("Exported {} rows of {} to {}", rows, month, path.display());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::GastosPaths;
    use crate::models::{Money, Movement, MovementKind};
    use crate::services::CsvImportService;
    use chrono::NaiveDate;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn create_test_storage(dir: &Path) -> Storage {
        Storage::new(GastosPaths::with_base_dir(dir.to_path_buf())).unwrap()
    }

    fn march() -> MonthKey {
        MonthKey::new(2024, 3).unwrap()
    }

    fn seed(storage: &Storage) -> Vec<Movement> {
        let ts = |d: u32, h: u32| {
            NaiveDate::from_ymd_opt(2024, 3, d)
                .unwrap()
                .and_hms_opt(h, 30, 0)
                .unwrap()
        };
        let movements = vec![
            Movement::new(ts(1, 8), MovementKind::Income, "Nómina", Money::from_cents(165_040), "Nómina"),
            Movement::new(ts(2, 13), MovementKind::Withdrawal, "Menú, bebida", Money::from_cents(1_350), "Comida"),
            Movement::new(ts(2, 13), MovementKind::Withdrawal, "Menú, bebida", Money::from_cents(1_350), "Comida"),
            Movement::new(ts(28, 20), MovementKind::Withdrawal, "Alquiler", Money::from_cents(70_000), "Casa"),
        ];
        for movement in &movements {
            storage.ledger.append(&march(), movement).unwrap();
        }
        movements
    }

    fn as_set(movements: &[Movement]) -> HashSet<String> {
        movements.iter().map(|m| format!("{:?}", m)).collect()
    }

    #[test]
    fn test_csv_export_then_import_round_trip() {
        let source_dir = TempDir::new().unwrap();
        let source = create_test_storage(source_dir.path());
        let seeded = seed(&source);

        let out = source_dir.path().join("export.csv");
        let rows = export_month(&source, &march(), ExportFormat::Csv, &out, "€").unwrap();
        assert_eq!(rows, 4);

        let target_dir = TempDir::new().unwrap();
        let target = create_test_storage(target_dir.path());
        let result = CsvImportService::new(&target).import(&out, None).unwrap();
        assert!(result.skipped.is_empty());

        let imported = target.ledger.read_month(&march()).unwrap().movements;
        assert_eq!(imported.len(), seeded.len());
        assert_eq!(as_set(&imported), as_set(&seeded));
    }

    #[test]
    fn test_export_is_audited() {
        let temp_dir = TempDir::new().unwrap();
        let storage = create_test_storage(temp_dir.path());
        seed(&storage);

        let out = temp_dir.path().join("marzo.xlsx");
        export_month(&storage, &march(), ExportFormat::Xlsx, &out, "€").unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].summary.as_deref(), Some("4 rows"));
    }

    #[test]
    fn test_empty_month_creates_no_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = create_test_storage(temp_dir.path());
        let out = temp_dir.path().join("empty.csv");

        let err = export_month(&storage, &march(), ExportFormat::Csv, &out, "€").unwrap_err();
        assert!(matches!(err, GastosError::Export(_)));
        assert!(!out.exists());
    }

    #[test]
    fn test_default_file_name() {
        assert_eq!(
            ExportFormat::Xlsx.default_file_name(&march()),
            "movimientos_2024-03.xlsx"
        );
    }
}
