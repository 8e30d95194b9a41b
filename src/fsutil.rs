//! Common file system operations with unified error handling

use std::fs;
use std::path::Path;

use crate::error::{KilnError, Result};

/// Read a file into a string, mapping the failure to a diagnostic
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| KilnError::FileReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Read a file's raw bytes
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| KilnError::FileReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Write a file, creating parent directories first
pub fn write(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| KilnError::FileWriteFailed {
            path: parent.display().to_string(),
            reason: e.to_string(),
        })?;
    }
    fs::write(path, contents).map_err(|e| KilnError::FileWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Copy a single file, creating parent directories first
pub fn copy(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).map_err(|e| KilnError::FileWriteFailed {
            path: parent.display().to_string(),
            reason: e.to_string(),
        })?;
    }
    fs::copy(src, dst).map_err(|e| KilnError::FileWriteFailed {
        path: dst.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(())
}

/// Rename a directory or file; failures are fatal to the calling operation
pub fn rename(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to).map_err(|e| KilnError::RenameFailed {
        from: from.display().to_string(),
        to: to.display().to_string(),
        reason: e.to_string(),
    })
}
