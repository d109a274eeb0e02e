//! Source URL parsing errors

use super::BitsError;

/// Creates an error for a source that does not parse into a URI
pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> BitsError {
    BitsError::InvalidUrl {
        url: url.into(),
        reason: reason.into(),
    }
}
