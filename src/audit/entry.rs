//! Audit entry data structures
//!
//! Defines the structure of audit log entries including operation types,
//! entity types, and the entry format itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Movement was added by hand
    Create,
    /// Movement(s) were removed
    Delete,
    /// Movement(s) came from a payslip or a CSV file
    Import,
    /// A month was written to an external file
    Export,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Delete => write!(f, "DELETE"),
            Operation::Import => write!(f, "IMPORT"),
            Operation::Export => write!(f, "EXPORT"),
        }
    }
}

/// Types of entities that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Movement,
    Month,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Movement => write!(f, "Movement"),
            EntityType::Month => write!(f, "Month"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub entity_type: EntityType,

    /// Month key the operation touched (`YYYY-MM`)
    pub entity_id: String,

    /// Human-readable description (movement description, file name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// Data removed by the operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// Data added by the operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Free-form summary (row counts, output path)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl AuditEntry {
    fn new(
        operation: Operation,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id: entity_id.into(),
            entity_name,
            before: None,
            after: None,
            summary: None,
        }
    }

    /// Create a new audit entry for a create operation
    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        let mut entry = Self::new(Operation::Create, entity_type, entity_id, entity_name);
        entry.after = serde_json::to_value(entity).ok();
        entry
    }

    /// Create a new audit entry for a delete operation
    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        let mut entry = Self::new(Operation::Delete, entity_type, entity_id, entity_name);
        entry.before = serde_json::to_value(entity).ok();
        entry
    }

    /// Create a new audit entry for an import
    pub fn import<T: Serialize>(
        entity_id: impl Into<String>,
        source: impl Into<String>,
        imported: &T,
        summary: impl Into<String>,
    ) -> Self {
        let mut entry = Self::new(
            Operation::Import,
            EntityType::Movement,
            entity_id,
            Some(source.into()),
        );
        entry.after = serde_json::to_value(imported).ok();
        entry.summary = Some(summary.into());
        entry
    }

    /// Create a new audit entry for an export
    pub fn export(entity_id: impl Into<String>, destination: impl Into<String>, rows: usize) -> Self {
        let mut entry = Self::new(
            Operation::Export,
            EntityType::Month,
            entity_id,
            Some(destination.into()),
        );
        entry.summary = Some(format!("{} rows", rows));
        entry
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        if let Some(summary) = &self.summary {
            output.push_str(&format!("\n  {}", summary));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Delete.to_string(), "DELETE");
        assert_eq!(Operation::Import.to_string(), "IMPORT");
    }

    #[test]
    fn test_create_entry() {
        let data = json!({"description": "Salary", "amount": 150000});
        let entry = AuditEntry::create(
            EntityType::Movement,
            "2024-03",
            Some("Salary".to_string()),
            &data,
        );

        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(entry.entity_type, EntityType::Movement);
        assert_eq!(entry.entity_id, "2024-03");
        assert!(entry.before.is_none());
        assert!(entry.after.is_some());
    }

    #[test]
    fn test_delete_entry() {
        let data = json!([{"description": "Coffee"}]);
        let entry = AuditEntry::delete(EntityType::Movement, "2024-03", None, &data);

        assert_eq!(entry.operation, Operation::Delete);
        assert!(entry.before.is_some());
        assert!(entry.after.is_none());
    }

    #[test]
    fn test_export_entry() {
        let entry = AuditEntry::export("2024-03", "/tmp/out.xlsx", 12);
        assert_eq!(entry.entity_type, EntityType::Month);
        assert_eq!(entry.summary.as_deref(), Some("12 rows"));
    }

    #[test]
    fn test_serialization() {
        let entry = AuditEntry::import("2024-03", "payslip.pdf", &json!({"amount": 1}), "1 row");

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"operation\":\"import\""));
        let deserialized: AuditEntry = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.operation, Operation::Import);
        assert_eq!(deserialized.entity_name.as_deref(), Some("payslip.pdf"));
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::export("2024-03", "out.csv", 3);
        let formatted = entry.format_human_readable();

        assert!(formatted.contains("EXPORT"));
        assert!(formatted.contains("Month 2024-03"));
        assert!(formatted.contains("(out.csv)"));
        assert!(formatted.contains("3 rows"));
    }
}
