//! Payslip import
//!
//! Finds the net pay ("líquido a percibir") in the text of a payslip PDF and
//! records it as an income movement. Text extraction sits behind
//! [`PdfTextSource`] so the amount heuristic stays a pure function.

use std::path::Path;
use std::sync::OnceLock;

use chrono::Local;
use regex::Regex;
use serde::Serialize;

use crate::audit::AuditEntry;
use crate::config::Settings;
use crate::error::{GastosError, GastosResult};
use crate::models::{Money, MonthKey, Movement, MovementKind};
use crate::storage::Storage;

/// How the net amount was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExtractionStrategy {
    /// Number following the "líquido a percibir" label
    Labeled,
    /// Largest plausible amount anywhere in the text
    Fallback,
}

impl std::fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Labeled => write!(f, "label"),
            Self::Fallback => write!(f, "largest plausible amount"),
        }
    }
}

/// A net amount found in payslip text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExtractedAmount {
    pub amount: Money,
    pub strategy: ExtractionStrategy,
}

fn labeled_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)L[ií]quido\s+a\s+percibir\s*[:\-]?\s*(?:€\s*)?(\d{1,3}(?:[.,]\d{3})+(?:[.,]\d{1,2})?|\d+(?:[.,]\d{1,2})?)",
        )
        .expect("net pay label regex")
    })
}

fn amount_token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(?:\d{1,3}(?:[.,]\d{3})+|\d+)[.,]\d{2}\b").expect("amount token regex")
    })
}

/// Find the net pay in payslip text
///
/// The labeled value wins when present and non-zero. Otherwise every
/// decimal-looking token within `[min, max]` (inclusive) is a candidate and
/// the largest one is taken. Returns `None` when nothing qualifies.
pub fn extract_net_amount(text: &str, min: Money, max: Money) -> Option<ExtractedAmount> {
    let labeled = labeled_regex()
        .captures_iter(text)
        .filter_map(|caps| Money::parse(&caps[1]).ok())
        .find(Money::is_positive);

    if let Some(amount) = labeled {
        return Some(ExtractedAmount {
            amount,
            strategy: ExtractionStrategy::Labeled,
        });
    }

    amount_token_regex()
        .find_iter(text)
        .filter_map(|token| Money::parse(token.as_str()).ok())
        .filter(|amount| amount.is_positive() && *amount >= min && *amount <= max)
        .max()
        .map(|amount| ExtractedAmount {
            amount,
            strategy: ExtractionStrategy::Fallback,
        })
}

/// Something that turns a PDF file into plain text
pub trait PdfTextSource {
    fn extract_text(&self, path: &Path) -> GastosResult<String>;
}

/// Text extraction with the `pdf-extract` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractSource;

impl PdfTextSource for PdfExtractSource {
    fn extract_text(&self, path: &Path) -> GastosResult<String> {
        if !path.is_file() {
            return Err(GastosError::Import(format!(
                "PDF file not found: {}",
                path.display()
            )));
        }

        pdf_extract::extract_text(path).map_err(|e| {
            GastosError::Import(format!("Failed to read PDF {}: {}", path.display(), e))
        })
    }
}

/// Outcome of a payslip import
#[derive(Debug, Clone)]
pub struct PayslipImport {
    pub month: MonthKey,
    pub movement: Movement,
    pub strategy: ExtractionStrategy,
}

/// Service that imports payslip PDFs as income
pub struct PayslipImportService<'a, S = PdfExtractSource> {
    storage: &'a Storage,
    source: S,
    category: String,
    min_amount: Money,
    max_amount: Money,
}

impl<'a> PayslipImportService<'a, PdfExtractSource> {
    /// Create a service reading PDFs with `pdf-extract`
    pub fn new(storage: &'a Storage, settings: &Settings) -> Self {
        Self::with_source(storage, settings, PdfExtractSource)
    }
}

impl<'a, S: PdfTextSource> PayslipImportService<'a, S> {
    /// Create a service with a custom text source
    pub fn with_source(storage: &'a Storage, settings: &Settings, source: S) -> Self {
        Self {
            storage,
            source,
            category: settings.payslip_category.clone(),
            min_amount: settings.payslip_min_amount,
            max_amount: settings.payslip_max_amount,
        }
    }

    /// Extract the net amount from a PDF without recording anything
    pub fn preview(&self, path: &Path) -> GastosResult<ExtractedAmount> {
        let text = self.source.extract_text(path)?;
        log::debug!("Extracted {} characters from {}", text.len(), path.display());

        extract_net_amount(&text, self.min_amount, self.max_amount).ok_or_else(|| {
            GastosError::Import(format!(
                "Could not detect the net amount in {}",
                path.display()
            ))
        })
    }

    /// Import a payslip into `month` as an income movement stamped now
    pub fn import(&self, path: &Path, month: &MonthKey) -> GastosResult<PayslipImport> {
        let extracted = self.preview(path)?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let movement = Movement::new(
            Local::now().naive_local(),
            MovementKind::Income,
            format!("Nómina PDF - {}", file_name),
            extracted.amount,
            self.category.clone(),
        );

        self.storage.ledger.append(month, &movement)?;
        self.storage.log_entry(&AuditEntry::import(
            month.to_string(),
            file_name,
            &movement,
            format!("net amount found by {}", extracted.strategy),
        ))?;

        log::info!(
            "Imported payslip {} ({}) into {}",
            path.display(),
            extracted.amount,
            month
        );

        Ok(PayslipImport {
            month: *month,
            movement,
            strategy: extracted.strategy,
        })
    }
}
