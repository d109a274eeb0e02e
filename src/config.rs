//! Migration configuration
//!
//! The archive root and TLS behavior are passed into the pipeline explicitly
//! so tests can point migrations at isolated temporary directories.

use std::path::PathBuf;

/// Default directory, relative to the working directory, that receives
/// materialized archives.
pub const DEFAULT_BITS_DIR: &str = "bits";

/// Settings shared by every migration in one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationConfig {
    /// Root directory for materialized zip archives
    pub bits_dir: PathBuf,

    /// Accept invalid TLS certificates when downloading over HTTPS
    pub skip_ssl_validation: bool,
}

impl MigrationConfig {
    /// Create a configuration rooted at `bits_dir`
    pub fn new(bits_dir: impl Into<PathBuf>) -> Self {
        Self {
            bits_dir: bits_dir.into(),
            skip_ssl_validation: false,
        }
    }

    /// Toggle TLS certificate validation for HTTP downloads
    #[must_use]
    pub fn with_skip_ssl_validation(mut self, skip: bool) -> Self {
        self.skip_ssl_validation = skip;
        self
    }
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BITS_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MigrationConfig::default();
        assert_eq!(config.bits_dir, PathBuf::from("bits"));
        assert!(!config.skip_ssl_validation);
    }

    #[test]
    fn test_builder() {
        let config = MigrationConfig::new("/tmp/bits").with_skip_ssl_validation(true);
        assert_eq!(config.bits_dir, PathBuf::from("/tmp/bits"));
        assert!(config.skip_ssl_validation);
    }
}
