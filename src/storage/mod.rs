//! Storage layer for gastos
//!
//! Per-month CSV files with atomic rewrites, plus the audit trail of every
//! change made through the services.

pub mod file_io;
pub mod init;
pub mod ledger;

pub use file_io::write_atomic;
pub use init::initialize_storage;
pub use ledger::{LedgerStore, MalformedRow, MonthLedger, HEADER};

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::GastosPaths;
use crate::error::GastosError;
use crate::models::MonthKey;

/// Main storage coordinator
pub struct Storage {
    paths: GastosPaths,
    pub ledger: LedgerStore,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: GastosPaths) -> Result<Self, GastosError> {
        paths.ensure_directories()?;

        Ok(Self {
            ledger: LedgerStore::new(paths.clone()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &GastosPaths {
        &self.paths
    }

    /// Get the audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Record a created entity in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        month: &MonthKey,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), GastosError> {
        self.audit.log(&AuditEntry::create(
            entity_type,
            month.to_string(),
            entity_name,
            entity,
        ))
    }

    /// Record a deleted entity in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        month: &MonthKey,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), GastosError> {
        self.audit.log(&AuditEntry::delete(
            entity_type,
            month.to_string(),
            entity_name,
            entity,
        ))
    }

    /// Record any prepared audit entry
    pub fn log_entry(&self, entry: &AuditEntry) -> Result<(), GastosError> {
        self.audit.log(entry)
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}
