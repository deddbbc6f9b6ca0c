//! Path management for gastos
//!
//! ## Path Resolution Order
//!
//! 1. `GASTOS_DATA_DIR` environment variable (if set)
//! 2. The platform config directory for `gastos-cli`
//!    (`~/.config/gastos-cli` on Linux, `%APPDATA%\gastos-cli` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::GastosError;
use crate::models::MonthKey;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "GASTOS_DATA_DIR";

/// Prefix of every month file name
const MONTH_FILE_PREFIX: &str = "movimientos_";

/// Manages all paths used by gastos
#[derive(Debug, Clone)]
pub struct GastosPaths {
    base_dir: PathBuf,
}

impl GastosPaths {
    /// Create a new GastosPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home/config directory can be determined.
    pub fn new() -> Result<Self, GastosError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create GastosPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding the month files
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Path of the file backing `month` (`movimientos_YYYY-MM.csv`)
    pub fn month_file(&self, month: &MonthKey) -> PathBuf {
        self.data_dir()
            .join(format!("{}{}.csv", MONTH_FILE_PREFIX, month))
    }

    /// Recover the month key from a month file name, if it is one
    pub fn month_from_file_name(name: &str) -> Option<MonthKey> {
        name.strip_prefix(MONTH_FILE_PREFIX)?
            .strip_suffix(".csv")?
            .parse()
            .ok()
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), GastosError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| GastosError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| GastosError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if gastos has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, GastosError> {
    ProjectDirs::from("", "", "gastos-cli")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| GastosError::Config("Could not determine a config directory".into()))
}
