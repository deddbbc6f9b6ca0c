//! User settings for gastos
//!
//! Manages user preferences such as the currency symbol, the default
//! category for manual entries and the payslip import parameters.

use serde::{Deserialize, Serialize};

use super::paths::GastosPaths;
use crate::error::GastosError;
use crate::models::Money;

/// User settings for gastos
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol appended to displayed amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Category used when a manual entry leaves it empty
    #[serde(default = "default_category")]
    pub default_category: String,

    /// Category given to imported payslips
    #[serde(default = "default_payslip_category")]
    pub payslip_category: String,

    /// Lower bound (inclusive) for fallback payslip amounts
    #[serde(default = "default_payslip_min")]
    pub payslip_min_amount: Money,

    /// Upper bound (inclusive) for fallback payslip amounts
    #[serde(default = "default_payslip_max")]
    pub payslip_max_amount: Money,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "€".to_string()
}

fn default_category() -> String {
    "General".to_string()
}

fn default_payslip_category() -> String {
    "Nómina".to_string()
}

fn default_payslip_min() -> Money {
    Money::from_units_cents(100, 0)
}

fn default_payslip_max() -> Money {
    Money::from_units_cents(10_000, 0)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            default_category: default_category(),
            payslip_category: default_payslip_category(),
            payslip_min_amount: default_payslip_min(),
            payslip_max_amount: default_payslip_max(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &GastosPaths) -> Result<Self, GastosError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| GastosError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                GastosError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &GastosPaths) -> Result<(), GastosError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| GastosError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| GastosError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Check that the payslip range is usable
    pub fn validate(&self) -> Result<(), GastosError> {
        if self.payslip_min_amount.is_negative() || self.payslip_min_amount > self.payslip_max_amount
        {
            return Err(GastosError::Config(format!(
                "Invalid payslip range: {} to {}",
                self.payslip_min_amount, self.payslip_max_amount
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "€");
        assert_eq!(settings.default_category, "General");
        assert_eq!(settings.payslip_min_amount.cents(), 10_000);
        assert_eq!(settings.payslip_max_amount.cents(), 1_000_000);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = GastosPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.currency_symbol = "$".into();
        settings.payslip_category = "Payroll".into();
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "$");
        assert_eq!(loaded.payslip_category, "Payroll");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let loaded: Settings = serde_json::from_str(r#"{"currency_symbol": "£"}"#).unwrap();
        assert_eq!(loaded.currency_symbol, "£");
        assert_eq!(loaded.default_category, "General");
        assert_eq!(loaded.payslip_max_amount, default_payslip_max());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = GastosPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.payslip_min_amount = Money::from_cents(500_000);
        settings.payslip_max_amount = Money::from_cents(100);
        settings.save(&paths).unwrap();

        assert!(Settings::load_or_create(&paths).is_err());
    }
}
