//! File system helpers.
//!
//! Thin wrappers over `std::fs` that add error context with the offending
//! path, tolerate already-absent targets, and write atomically where a torn
//! file would be worse than no file.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Create a directory and all missing parents. No-op when it exists.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create directory: {}", path.display()))
}

/// Create the parent directory of a file path, if it has one.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    Ok(())
}

/// Write `content` to `path` through a temporary file in the same directory
/// followed by a rename, so readers never observe a partial write.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    ensure_parent_dir(path)?;
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
    std::io::Write::write_all(&mut temp, content)
        .with_context(|| format!("Failed to write temp file for {}", path.display()))?;
    temp.persist(path)
        .with_context(|| format!("Failed to persist file: {}", path.display()))?;
    Ok(())
}

/// Remove a directory tree. No-op when the path does not exist.
pub fn remove_dir_all(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path)
            .with_context(|| format!("Failed to remove directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read and decode a JSON file.
pub fn read_json_file<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Invalid JSON in {}", path.display()))
}

/// Human-readable byte count, used in backup summaries.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.2} {}", UNITS[unit])
    }
}
