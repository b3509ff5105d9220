//! File system errors

use std::path::Path;

use super::GemstageError;

/// Creates a file not found error
pub fn not_found(path: &Path) -> GemstageError {
    GemstageError::FileNotFound {
        path: path.display().to_string(),
    }
}

/// Creates a read error for `path`
pub fn read_failed(path: &Path, err: &std::io::Error) -> GemstageError {
    GemstageError::FileReadFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates a write error for `path`
pub fn write_failed(path: &Path, err: &std::io::Error) -> GemstageError {
    GemstageError::FileWriteFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}
