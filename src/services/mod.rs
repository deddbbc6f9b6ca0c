//! Service layer for gastos
//!
//! The service layer provides business logic on top of the storage layer:
//! validation, balances, search, and the PDF and CSV imports.

pub mod balance;
pub mod import;
pub mod movement;
pub mod payslip;
pub mod search;

pub use balance::{compute_balance, CategoryTotal, MonthSummary};
pub use import::{CsvImportResult, CsvImportService};
pub use movement::{CreateMovementInput, MovementService};
pub use payslip::{
    extract_net_amount, ExtractedAmount, ExtractionStrategy, PayslipImport,
    PayslipImportService, PdfExtractSource, PdfTextSource,
};
pub use search::filter_movements;
