//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::GastosError;

/// Ensure the parent directory of `path` exists
pub fn ensure_parent_dir(path: &Path) -> Result<(), GastosError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            GastosError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }
    Ok(())
}

/// Write a file atomically (write to temp, then rename)
///
/// `write` receives a buffered writer over a temp file next to `path`. The
/// temp file is synced and renamed over `path` only if `write` succeeds, so
/// the target is either completely written or not modified at all.
pub fn write_atomic<P, F>(path: P, write: F) -> Result<(), GastosError>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<File>) -> Result<(), GastosError>,
{
    let path = path.as_ref();
    ensure_parent_dir(path)?;

    // Temp file lives in the same directory so the rename stays atomic
    let extension = path
        .extension()
        .map(|ext| format!("{}.tmp", ext.to_string_lossy()))
        .unwrap_or_else(|| "tmp".to_string());
    let temp_path = path.with_extension(extension);

    let file = File::create(&temp_path)
        .map_err(|e| GastosError::Storage(format!("Failed to create temp file: {}", e)))?;
    let mut writer = BufWriter::new(file);

    if let Err(e) = write(&mut writer) {
        drop(writer);
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    writer
        .flush()
        .map_err(|e| GastosError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| GastosError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        GastosError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

/// Open a file for appending, creating it (and its directory) if needed
///
/// Returns the file and whether it was empty before opening.
pub fn open_append<P: AsRef<Path>>(path: P) -> Result<(File, bool), GastosError> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;

    let was_empty = match fs::metadata(path) {
        Ok(meta) => meta.len() == 0,
        Err(_) => true,
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| GastosError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    Ok((file, was_empty))
}
