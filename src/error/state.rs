//! State document errors

use super::BitsError;

/// Creates an error for an unreadable state file
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> BitsError {
    BitsError::StateRead {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an error for a state file that is not a valid document
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> BitsError {
    BitsError::StateParse {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an error for a state file that cannot be written
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> BitsError {
    BitsError::StateWrite {
        path: path.into(),
        reason: reason.into(),
    }
}
