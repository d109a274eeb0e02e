//! Bits source resolution
//!
//! This module resolves a legacy source descriptor to one canonical URI:
//! - Raw URLs: `https://host/app.zip`, `file:///srv/app`, `./app`
//! - Git repositories: `https://host/repo.git`, `git@host:owner/repo.git`,
//!   local paths, with the branch/tag carried in the fragment
//! - GitHub releases: versioned assets on github.com, latest release via glare
//!
//! ## Module Organization
//!
//! - `uri.rs`: SourceUri type, parsing and display
//! - `github.rs`: Release URL decision table
//! - `resolve.rs`: Descriptor to URI resolution

pub mod github;
pub mod resolve;
pub mod uri;

pub use resolve::resolve;
pub use uri::{Credentials, SourceUri};
