//! Month ledger storage
//!
//! Each calendar month lives in its own comma-separated file,
//! `movimientos_YYYY-MM.csv`, with the header
//! `Fecha,Tipo,Descripción,Monto,Categoría`.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use crate::config::paths::GastosPaths;
use crate::error::GastosError;
use crate::models::{parse_timestamp, Money, MonthKey, Movement, MovementKind};

use super::file_io::{open_append, write_atomic};

/// Column headers of a month file
pub const HEADER: [&str; 5] = ["Fecha", "Tipo", "Descripción", "Monto", "Categoría"];

/// A row on disk that could not be read as a movement
///
/// Kept verbatim so rewriting the month never drops it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRow {
    /// 1-based line number in the file
    pub line: u64,
    pub fields: Vec<String>,
    pub reason: String,
}

/// All movements of one month, in file (insertion) order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthLedger {
    pub month: MonthKey,
    pub movements: Vec<Movement>,
    pub malformed: Vec<MalformedRow>,
}

impl MonthLedger {
    /// Create an empty ledger for a month
    pub fn new(month: MonthKey) -> Self {
        Self {
            month,
            movements: Vec::new(),
            malformed: Vec::new(),
        }
    }

    /// Whether the month holds no readable movements
    pub fn is_empty(&self) -> bool {
        self.movements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.movements.len()
    }

    pub fn push(&mut self, movement: Movement) {
        self.movements.push(movement);
    }

    /// Movements sorted newest first; equal timestamps keep file order
    pub fn newest_first(&self) -> Vec<Movement> {
        let mut sorted = self.movements.clone();
        sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        sorted
    }

    /// Remove every movement matching `target` field by field
    ///
    /// Returns how many rows were removed. Identical duplicates all go.
    pub fn remove_matching(&mut self, target: &Movement) -> usize {
        let before = self.movements.len();
        self.movements.retain(|m| !m.matches(target));
        before - self.movements.len()
    }
}

/// Repository for the per-month files
#[derive(Debug, Clone)]
pub struct LedgerStore {
    paths: GastosPaths,
}

impl LedgerStore {
    /// Create a new ledger store over the given paths
    pub fn new(paths: GastosPaths) -> Self {
        Self { paths }
    }

    /// Path of the month's file
    pub fn file_for(&self, month: &MonthKey) -> PathBuf {
        self.paths.month_file(month)
    }

    /// Whether the month has a file on disk
    pub fn exists(&self, month: &MonthKey) -> bool {
        self.file_for(month).exists()
    }

    /// Create the month file with only the header row, if it is missing
    pub fn initialize_month(&self, month: &MonthKey) -> Result<(), GastosError> {
        let path = self.file_for(month);
        if path.exists() {
            return Ok(());
        }

        write_atomic(&path, |w| {
            let mut writer = WriterBuilder::new().from_writer(w);
            writer.write_record(HEADER)?;
            writer.flush()?;
            Ok(())
        })?;

        log::debug!("Initialized month file {}", path.display());
        Ok(())
    }

    /// Append one movement to the month's file
    pub fn append(&self, month: &MonthKey, movement: &Movement) -> Result<(), GastosError> {
        let path = self.file_for(month);
        let (file, was_empty) = open_append(&path)?;

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        if was_empty {
            writer.write_record(HEADER)?;
        }
        writer.write_record(movement_to_record(movement))?;
        writer.flush()?;

        log::debug!("Appended movement to {}", path.display());
        Ok(())
    }

    /// Read a whole month; a missing file is an empty ledger
    pub fn read_month(&self, month: &MonthKey) -> Result<MonthLedger, GastosError> {
        let path = self.file_for(month);
        let mut ledger = MonthLedger::new(*month);

        if !path.exists() {
            return Ok(ledger);
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&path)
            .map_err(|e| {
                GastosError::Storage(format!("Failed to open {}: {}", path.display(), e))
            })?;

        for result in reader.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            match record_to_movement(&record) {
                Ok(movement) => ledger.movements.push(movement),
                Err(reason) => {
                    log::warn!("{}:{}: skipping row: {}", path.display(), line, reason);
                    ledger.malformed.push(MalformedRow {
                        line,
                        fields: record.iter().map(str::to_string).collect(),
                        reason,
                    });
                }
            }
        }

        Ok(ledger)
    }

    /// Replace the month's file with the given ledger
    ///
    /// Malformed rows are written back after the movements, unchanged.
    pub fn overwrite(&self, ledger: &MonthLedger) -> Result<(), GastosError> {
        let path = self.file_for(&ledger.month);

        write_atomic(&path, |w| {
            let mut writer = WriterBuilder::new().flexible(true).from_writer(w);
            writer.write_record(HEADER)?;
            for movement in &ledger.movements {
                writer.write_record(movement_to_record(movement))?;
            }
            for row in &ledger.malformed {
                writer.write_record(&row.fields)?;
            }
            writer.flush()?;
            Ok(())
        })?;

        log::debug!(
            "Rewrote {} with {} movements",
            path.display(),
            ledger.movements.len()
        );
        Ok(())
    }

    /// Months that have a file, oldest first
    pub fn list_months(&self) -> Result<Vec<MonthKey>, GastosError> {
        let data_dir = self.paths.data_dir();
        if !data_dir.exists() {
            return Ok(Vec::new());
        }

        let mut months: Vec<MonthKey> = fs::read_dir(&data_dir)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name();
                GastosPaths::month_from_file_name(&name.to_string_lossy())
            })
            .collect();

        months.sort();
        Ok(months)
    }

    /// Write a ledger's rows (header included) to any writer, in file format
    pub fn write_csv<W: Write>(ledger: &MonthLedger, out: W) -> Result<(), GastosError> {
        let mut writer = WriterBuilder::new().from_writer(out);
        writer.write_record(HEADER)?;
        for movement in &ledger.movements {
            writer.write_record(movement_to_record(movement))?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Serialize a movement as a month-file row
pub fn movement_to_record(movement: &Movement) -> [String; 5] {
    [
        movement.formatted_timestamp(),
        movement.kind.label().to_string(),
        movement.description.clone(),
        movement.amount.to_string(),
        movement.category.clone(),
    ]
}

/// Parse a month-file row into a movement
pub fn record_to_movement(record: &StringRecord) -> Result<Movement, String> {
    if record.len() != HEADER.len() {
        return Err(format!(
            "expected {} fields, found {}",
            HEADER.len(),
            record.len()
        ));
    }

    let timestamp = parse_timestamp(&record[0]).map_err(|e| e.to_string())?;
    let kind = record[1]
        .parse::<MovementKind>()
        .map_err(|e| e.to_string())?;
    let amount = Money::parse(&record[3]).map_err(|e| e.to_string())?;

    let movement = Movement::new(timestamp, kind, &record[2], amount, &record[4]);
    movement.validate().map_err(|e| e.to_string())?;
    Ok(movement)
}
