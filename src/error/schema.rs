//! Legacy schema errors

use super::BitsError;

/// Creates an error for an attribute that cannot be decoded
pub fn decode_failed(key: impl Into<String>, reason: impl Into<String>) -> BitsError {
    BitsError::SchemaDecode {
        key: key.into(),
        reason: reason.into(),
    }
}

/// Creates an error for a legacy feature that cannot be carried forward
pub fn unsupported_feature(feature: impl Into<String>) -> BitsError {
    BitsError::UnsupportedFeature {
        feature: feature.into(),
    }
}
