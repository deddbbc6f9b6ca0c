//! Excel export
//!
//! One `Movimientos` sheet with a styled header row, bordered cells, real
//! date-time cells, a currency number format and an auto-filter.

use std::path::Path;

use chrono::{Datelike, Timelike};
use rust_xlsxwriter::{
    Color, ExcelDateTime, Format, FormatAlign, FormatBorder, Workbook, XlsxError,
};

use crate::error::{GastosError, GastosResult};
use crate::models::Movement;
use crate::storage::{MonthLedger, HEADER};

/// Name of the exported worksheet
pub const SHEET_NAME: &str = "Movimientos";

const HEADER_FILL: u32 = 0x4F81BD;
const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm";

const COL_DATE: u16 = 0;
const COL_KIND: u16 = 1;
const COL_DESCRIPTION: u16 = 2;
const COL_AMOUNT: u16 = 3;
const COL_CATEGORY: u16 = 4;

fn xlsx_error(e: XlsxError) -> GastosError {
    GastosError::Export(format!("Failed to write spreadsheet: {}", e))
}

/// Export a month's movements to an `.xlsx` file, returning the row count
///
/// An empty month is refused.
pub fn export_month_xlsx(
    ledger: &MonthLedger,
    path: &Path,
    currency_symbol: &str,
) -> GastosResult<usize> {
    if ledger.is_empty() {
        return Err(GastosError::Export(format!(
            "No data to export for {}",
            ledger.month
        )));
    }

    let mut workbook = build_workbook(&ledger.movements, currency_symbol).map_err(xlsx_error)?;
    workbook.save(path).map_err(xlsx_error)?;

    Ok(ledger.len())
}

fn build_workbook(movements: &[Movement], currency_symbol: &str) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin);
    let text_format = Format::new().set_border(FormatBorder::Thin);
    let datetime_format = Format::new()
        .set_num_format(DATETIME_FORMAT)
        .set_border(FormatBorder::Thin);
    let amount_format = Format::new()
        .set_num_format(amount_num_format(currency_symbol))
        .set_border(FormatBorder::Thin);

    let mut widths: Vec<usize> = HEADER.iter().map(|h| h.chars().count()).collect();

    for (col, title) in HEADER.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &header_format)?;
    }

    for (i, movement) in movements.iter().enumerate() {
        let row = i as u32 + 1;
        let cells = [
            movement.formatted_timestamp(),
            movement.kind.label().to_string(),
            movement.description.clone(),
            movement.amount.to_string(),
            movement.category.clone(),
        ];
        for (width, cell) in widths.iter_mut().zip(&cells) {
            *width = (*width).max(cell.chars().count());
        }

        let ts = movement.timestamp;
        let datetime = ExcelDateTime::from_ymd(ts.year() as u16, ts.month() as u8, ts.day() as u8)?
            .and_hms(ts.hour() as u16, ts.minute() as u8, 0)?;

        worksheet.write_datetime_with_format(row, COL_DATE, &datetime, &datetime_format)?;
        worksheet.write_string_with_format(row, COL_KIND, movement.kind.label(), &text_format)?;
        worksheet.write_string_with_format(
            row,
            COL_DESCRIPTION,
            &movement.description,
            &text_format,
        )?;
        worksheet.write_number_with_format(
            row,
            COL_AMOUNT,
            movement.amount.as_f64(),
            &amount_format,
        )?;
        worksheet.write_string_with_format(row, COL_CATEGORY, &movement.category, &text_format)?;
    }

    for (col, width) in widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, (*width + 2) as f64)?;
    }

    worksheet.autofilter(0, 0, movements.len() as u32, COL_CATEGORY)?;

    Ok(workbook)
}

/// Excel number format showing the currency symbol before the amount
fn amount_num_format(currency_symbol: &str) -> String {
    if currency_symbol.is_empty() {
        "#,##0.00".to_string()
    } else {
        format!("\"{}\"#,##0.00", currency_symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, MonthKey, MovementKind};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn ledger() -> MonthLedger {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 31)
            .unwrap()
            .and_hms_opt(23, 59, 0)
            .unwrap();
        let mut ledger = MonthLedger::new(MonthKey::new(2024, 3).unwrap());
        ledger.push(Movement::new(ts, MovementKind::Income, "Nómina", Money::from_cents(150_000), "Nómina"));
        ledger.push(Movement::new(ts, MovementKind::Withdrawal, "Gimnasio", Money::from_cents(3_999), "Salud"));
        ledger
    }

    #[test]
    fn test_export_writes_workbook() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("marzo.xlsx");

        let rows = export_month_xlsx(&ledger(), &path, "€").unwrap();
        assert_eq!(rows, 2);

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.len() > 100);
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_empty_month_is_refused() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.xlsx");
        let empty = MonthLedger::new(MonthKey::new(2024, 3).unwrap());

        assert!(matches!(
            export_month_xlsx(&empty, &path, "€"),
            Err(GastosError::Export(_))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_amount_num_format() {
        assert_eq!(amount_num_format("€"), "\"€\"#,##0.00");
        assert_eq!(amount_num_format(""), "#,##0.00");
    }
}
