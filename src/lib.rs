//! gastos - Monthly income and expense tracker for the terminal
//!
//! This library provides the core functionality of gastos. Movements (incomes
//! and withdrawals) are kept in one CSV file per calendar month; the net pay
//! of a payslip PDF can be imported as income, and any month can be exported
//! to CSV or Excel.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (movements, months, money)
//! - `storage`: Per-month CSV file storage
//! - `audit`: Audit logging system
//! - `services`: Business logic (balances, search, imports)
//! - `export`: CSV and XLSX export
//! - `display`: Terminal formatting for the CLI
//! - `cli`: CLI command handlers
//! - `tui`: Interactive terminal interface
//!
//! # Example
//!
//! ```rust,ignore
//! use gastos_cli::config::{paths::GastosPaths, settings::Settings};
//!
//! let paths = GastosPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;
pub mod tui;

pub use error::{GastosError, GastosResult};
