//! Audit logging system for gastos
//!
//! Records every movement added or removed, and every import and export, in
//! an append-only audit log.
//!
//! - `AuditEntry`: one log entry with timestamp, operation, the month it
//!   touched and an optional snapshot of the affected data.
//! - `AuditLogger`: writes entries to the audit log file as line-delimited
//!   JSON (JSONL) and reads them back.
//!
//! # Example
//!
//! ```rust,ignore
//! use gastos_cli::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! let entry = AuditEntry::create(
//!     EntityType::Movement,
//!     "2024-03",
//!     Some(movement.description.clone()),
//!     &movement,
//! );
//! logger.log(&entry)?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
