//! Content fetching errors

use super::BitsError;

/// Creates an error for a transport-level fetch failure
pub fn failed(uri: impl Into<String>, reason: impl Into<String>) -> BitsError {
    BitsError::Fetch {
        uri: uri.into(),
        reason: reason.into(),
    }
}

/// Creates an error for a URI no handler accepts
pub fn unsupported_scheme(scheme: impl Into<String>) -> BitsError {
    BitsError::UnsupportedScheme {
        scheme: scheme.into(),
    }
}

/// Creates an error for a failed repository operation
pub fn git(message: impl Into<String>) -> BitsError {
    BitsError::Git {
        message: message.into(),
    }
}
