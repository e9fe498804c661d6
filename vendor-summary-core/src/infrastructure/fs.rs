// vendor-summary-core/src/infrastructure/fs.rs

use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::infrastructure::error::InfrastructureError;

/// Serializes `data` as pretty JSON and swaps it into `path` in one rename.
///
/// Readers see either the previous file or the complete new one, never a torn write.
/// Missing parent directories are created.
pub fn write_json_atomic<T: Serialize>(path: &Path, data: &T) -> Result<(), InfrastructureError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let body = serde_json::to_vec_pretty(data)?;

    // Same directory as the target so the rename never crosses filesystems.
    let mut staged = tempfile::NamedTempFile::new_in(parent)?;
    staged.write_all(&body)?;
    staged.write_all(b"\n")?;
    staged
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}
