//! Error types and handling for bits-migrate
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`schema`]: Legacy attribute decoding and unsupported features
//! - [`source`]: Source URL parsing errors
//! - [`fetch`]: Content fetching errors (git, http, local)
//! - [`fs`]: File system errors
//! - [`state`]: State document errors
//!
//! Command line usage errors are constructed directly.

pub mod fetch;
pub mod fs;
pub mod schema;
pub mod source;
pub mod state;

pub use fetch::{failed as fetch_failed, git as git_failed, unsupported_scheme};
pub use fs::failed as filesystem_failed;
pub use schema::{decode_failed as schema_decode_failed, unsupported_feature};
pub use source::invalid_url;
pub use state::{parse_failed as state_parse_failed, read_failed as state_read_failed};

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for bits migrations
#[derive(Error, Diagnostic, Debug)]
pub enum BitsError {
    // Schema errors
    #[error("Failed to decode legacy attribute '{key}': {reason}")]
    #[diagnostic(code(bits::schema::decode_failed))]
    SchemaDecode { key: String, reason: String },

    #[error("{feature} attribute can't be migrated")]
    #[diagnostic(
        code(bits::schema::unsupported_feature),
        help(
            "Rework the resource without {feature} and remove every {feature} attribute from the state file, then run the migration again"
        )
    )]
    UnsupportedFeature { feature: String },

    // Source errors
    #[error("Invalid source URL '{url}': {reason}")]
    #[diagnostic(
        code(bits::source::invalid_url),
        help("Valid formats: https://host/path, git@host:owner/repo.git, ./local/path")
    )]
    InvalidUrl { url: String, reason: String },

    // Fetch errors
    #[error("Failed to fetch '{uri}': {reason}")]
    #[diagnostic(
        code(bits::fetch::failed),
        help("Check that the source is reachable and the credentials are correct")
    )]
    Fetch { uri: String, reason: String },

    #[error("No content handler for scheme '{scheme}'")]
    #[diagnostic(
        code(bits::fetch::unsupported_scheme),
        help("Supported sources: git (ssh, git, https ending in .git), http(s), local paths")
    )]
    UnsupportedScheme { scheme: String },

    #[error("Git operation failed: {message}")]
    #[diagnostic(code(bits::fetch::git))]
    Git { message: String },

    // File system errors
    #[error("File system operation failed on '{path}': {reason}")]
    #[diagnostic(code(bits::fs::failed))]
    Filesystem { path: String, reason: String },

    // State document errors
    #[error("Failed to read state file: {path}")]
    #[diagnostic(code(bits::state::read_failed))]
    StateRead { path: String, reason: String },

    #[error("Failed to parse state file: {path}: {reason}")]
    #[diagnostic(
        code(bits::state::parse_failed),
        help("Expected a JSON object with 'id' and 'attributes', or an 'instances' array")
    )]
    StateParse { path: String, reason: String },

    #[error("Failed to write state file: {path}: {reason}")]
    #[diagnostic(code(bits::state::write_failed))]
    StateWrite { path: String, reason: String },

    // CLI errors
    #[error("Unknown shell: {shell}")]
    #[diagnostic(
        code(bits::cli::unknown_shell),
        help("Supported shells: bash, elvish, fish, powershell, zsh")
    )]
    UnknownShell { shell: String },
}

impl BitsError {
    /// Whether re-running the migration may succeed without operator action.
    ///
    /// Only an unsupported legacy feature is a hard stop; everything else
    /// depends on external sources or the filesystem and can be retried.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, BitsError::UnsupportedFeature { .. })
    }
}

impl From<serde_json::Error> for BitsError {
    fn from(err: serde_json::Error) -> Self {
        BitsError::StateParse {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, BitsError>;
