//! Git operations for fetching repository sources
//!
//! This module handles:
//! - Cloning repositories (HTTPS, SSH, git protocol and local paths)
//! - Resolving refs (branches, tags, SHAs) to commits
//! - Checking out the resolved commit
//! - Authentication, first with URL credentials and then via git's native
//!   credential system

pub mod auth;
pub mod checkout;
pub mod clone;
pub mod error;
pub mod refs;
pub mod url;

pub use checkout::checkout_commit;
pub use clone::clone;
pub use refs::resolve_ref;
