//! File system errors

use std::path::Path;

use super::BitsError;

/// Creates an error for a failed directory, file or copy operation
pub fn failed(path: impl Into<String>, reason: impl Into<String>) -> BitsError {
    BitsError::Filesystem {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Maps an I/O error on `path` to a file system error
pub fn at(path: &Path, err: &std::io::Error) -> BitsError {
    failed(path.display().to_string(), err.to_string())
}
