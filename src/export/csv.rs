//! CSV export
//!
//! Writes a month in the same layout as the month files, so the output can be
//! imported back.

use std::io::Write;

use crate::error::{GastosError, GastosResult};
use crate::storage::{LedgerStore, MonthLedger};

/// Export a month's movements as CSV, returning the number of rows written
///
/// An empty month is refused.
pub fn export_month_csv<W: Write>(ledger: &MonthLedger, writer: W) -> GastosResult<usize> {
    if ledger.is_empty() {
        return Err(GastosError::Export(format!(
            "No data to export for {}",
            ledger.month
        )));
    }

    LedgerStore::write_csv(ledger, writer)
        .map_err(|e| GastosError::Export(e.to_string()))?;

    Ok(ledger.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, MonthKey, Movement, MovementKind};
    use chrono::NaiveDate;

    fn ledger() -> MonthLedger {
        let ts = |d: u32| {
            NaiveDate::from_ymd_opt(2024, 3, d)
                .unwrap()
                .and_hms_opt(9, 15, 0)
                .unwrap()
        };
        let mut ledger = MonthLedger::new(MonthKey::new(2024, 3).unwrap());
        ledger.push(Movement::new(ts(1), MovementKind::Income, "Nómina", Money::from_cents(150_000), "Nómina"));
        ledger.push(Movement::new(ts(3), MovementKind::Withdrawal, "Luz \"marzo\"", Money::from_cents(6_105), "Casa"));
        ledger
    }

    #[test]
    fn test_export_writes_month_layout() {
        let mut output = Vec::new();
        let rows = export_month_csv(&ledger(), &mut output).unwrap();
        assert_eq!(rows, 2);

        let csv = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Fecha,Tipo,Descripción,Monto,Categoría");
        assert_eq!(lines[1], "2024-03-01 09:15,Ingreso,Nómina,1500.00,Nómina");
        assert_eq!(lines[2], "2024-03-03 09:15,Retiro,\"Luz \"\"marzo\"\"\",61.05,Casa");
    }

    #[test]
    fn test_empty_month_is_refused() {
        let empty = MonthLedger::new(MonthKey::new(2024, 3).unwrap());
        let mut output = Vec::new();

        let err = export_month_csv(&empty, &mut output).unwrap_err();
        assert!(matches!(err, GastosError::Export(_)));
        assert!(output.is_empty());
    }
}
