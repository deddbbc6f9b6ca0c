//! Storage initialization
//!
//! Handles first-run setup

use crate::config::paths::GastosPaths;
use crate::error::GastosError;
use crate::models::MonthKey;

use super::ledger::LedgerStore;

/// Initialize storage for a fresh installation
///
/// Creates the directories and an empty file for the current month.
pub fn initialize_storage(paths: &GastosPaths) -> Result<(), GastosError> {
    paths.ensure_directories()?;
    LedgerStore::new(paths.clone()).initialize_month(&MonthKey::current())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_creates_current_month() {
        let temp_dir = TempDir::new().unwrap();
        let paths = GastosPaths::with_base_dir(temp_dir.path().to_path_buf());

        initialize_storage(&paths).unwrap();

        assert!(paths.month_file(&MonthKey::current()).exists());
    }
}
