//! CLI command for reading the audit log

use crate::error::GastosResult;
use crate::storage::Storage;

/// Handle `audit`: print the most recent entries, oldest first
pub fn handle_audit_command(storage: &Storage, count: usize) -> GastosResult<()> {
    let entries = storage.audit().read_recent(count)?;

    if entries.is_empty() {
        println!("No audit entries yet.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
