//! Checkout operations for git repositories

use git2::{Oid, Repository};

use crate::error::{Result, git_failed};

/// Checkout a specific commit in the repository, detaching HEAD
pub fn checkout_commit(repo: &Repository, sha: &str) -> Result<()> {
    let checkout_failed = |e: git2::Error| git_failed(format!("checkout of {sha} failed: {}", e.message()));

    let oid = Oid::from_str(sha).map_err(checkout_failed)?;
    let commit = repo.find_commit(oid).map_err(checkout_failed)?;

    repo.set_head_detached(commit.id()).map_err(checkout_failed)?;

    // Checkout the working tree
    let mut checkout_builder = git2::build::CheckoutBuilder::new();
    checkout_builder.force();

    repo.checkout_head(Some(&mut checkout_builder))
        .map_err(checkout_failed)
}
