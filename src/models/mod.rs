//! Core data models for gastos
//!
//! Movements, the months that group them, and the money type used for
//! every amount.

pub mod money;
pub mod month;
pub mod movement;

pub use money::{Money, MoneyParseError};
pub use month::{MonthKey, MonthParseError};
pub use movement::{
    format_timestamp, parse_timestamp, Movement, MovementKind, MovementValidationError,
    DEFAULT_CATEGORY, TIMESTAMP_FORMAT,
};
