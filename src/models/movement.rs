//! Movement model
//!
//! A movement is one income or expense record. Amounts are stored
//! non-negative; the sign is implied by the kind.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;

/// Timestamp layout used in month files and on screen
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Category assigned when none is given
pub const DEFAULT_CATEGORY: &str = "General";

/// Kind of movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementKind {
    /// Money coming in (stored as "Ingreso")
    #[serde(rename = "Ingreso")]
    Income,
    /// Money going out (stored as "Retiro")
    #[serde(rename = "Retiro")]
    Withdrawal,
}

impl MovementKind {
    /// Label written to the month file's `Tipo` column
    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "Ingreso",
            Self::Withdrawal => "Retiro",
        }
    }

    /// Sign applied to the stored amount when computing a balance
    pub fn signed(&self, amount: Money) -> Money {
        match self {
            Self::Income => amount,
            Self::Withdrawal => -amount,
        }
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for MovementKind {
    type Err = MovementValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ingreso" | "income" => Ok(Self::Income),
            "retiro" | "gasto" | "withdrawal" | "expense" => Ok(Self::Withdrawal),
            _ => Err(MovementValidationError::UnknownKind(s.trim().to_string())),
        }
    }
}

/// One income or expense record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    /// When the movement happened (minute precision)
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,

    pub kind: MovementKind,

    pub description: String,

    /// Non-negative amount in currency units
    pub amount: Money,

    pub category: String,
}

impl Movement {
    /// Create a new movement; the timestamp is truncated to the minute and an
    /// empty category becomes `General`
    pub fn new(
        timestamp: NaiveDateTime,
        kind: MovementKind,
        description: impl Into<String>,
        amount: Money,
        category: impl Into<String>,
    ) -> Self {
        let category = category.into();
        let category = if category.trim().is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            category.trim().to_string()
        };

        Self {
            timestamp: truncate_to_minute(timestamp),
            kind,
            description: description.into().trim().to_string(),
            amount,
            category,
        }
    }

    /// Amount with the kind's sign applied
    pub fn signed_amount(&self) -> Money {
        self.kind.signed(self.amount)
    }

    /// Timestamp rendered as `YYYY-MM-DD HH:MM`
    pub fn formatted_timestamp(&self) -> String {
        format_timestamp(self.timestamp)
    }

    /// Whether `other` has identical fields, with amounts within one cent
    ///
    /// This is how a displayed row is matched back to the file; rows that are
    /// identical in every field are indistinguishable.
    pub fn matches(&self, other: &Movement) -> bool {
        self.timestamp == other.timestamp
            && self.kind == other.kind
            && self.description == other.description
            && self.amount.approx_eq(other.amount, Money::from_cents(1))
            && self.category == other.category
    }

    /// Validate the movement
    pub fn validate(&self) -> Result<(), MovementValidationError> {
        if self.amount.is_negative() {
            return Err(MovementValidationError::NegativeAmount(self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.formatted_timestamp(),
            self.kind,
            self.description,
            self.amount
        )
    }
}

/// Drop seconds and sub-second precision
pub fn truncate_to_minute(timestamp: NaiveDateTime) -> NaiveDateTime {
    timestamp
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(timestamp)
}

/// Render a timestamp as `YYYY-MM-DD HH:MM`
pub fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD HH:MM` timestamp, also accepting a trailing `:SS`
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, MovementValidationError> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .map(truncate_to_minute)
        .map_err(|_| MovementValidationError::InvalidTimestamp(s.to_string()))
}

mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(*ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_timestamp(&s).map_err(serde::de::Error::custom)
    }
}

/// Validation errors for movements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovementValidationError {
    NegativeAmount(Money),
    UnknownKind(String),
    InvalidTimestamp(String),
}

impl fmt::Display for MovementValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount(amount) => {
                write!(f, "Amount must not be negative (got {})", amount)
            }
            Self::UnknownKind(kind) => {
                write!(f, "Unknown movement type '{}' (use Ingreso or Retiro)", kind)
            }
            Self::InvalidTimestamp(ts) => {
                write!(f, "Invalid date '{}', expected YYYY-MM-DD HH:MM", ts)
            }
        }
    }
}

impl std::error::Error for MovementValidationError {}
