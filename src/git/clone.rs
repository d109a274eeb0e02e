//! Repository cloning operations

use std::path::Path;

use git2::{FetchOptions, RemoteCallbacks, Repository, build::RepoBuilder};
use tracing::debug;

use super::auth::setup_auth_callbacks;
use super::error::interpret_git_error;
use crate::error::{Result, fetch_failed};
use crate::source::Credentials;

/// Clone a git repository to a target directory
///
/// # Arguments
/// * `location` - Clone location without credentials: a URL libgit2
///   understands or a local path
/// * `target` - The target directory path
/// * `shallow` - Whether to do a shallow clone (depth=1). Ignored for local
///   sources. Pass false when a specific ref must be checked out afterwards.
/// * `credentials` - Userinfo from the source URL, offered before git's own
///   credential chain
pub fn clone(
    location: &str,
    target: &Path,
    shallow: bool,
    credentials: Option<Credentials>,
) -> Result<Repository> {
    let mut callbacks = RemoteCallbacks::new();
    setup_auth_callbacks(&mut callbacks, credentials);

    let mut fetch_options = FetchOptions::new();
    fetch_options.remote_callbacks(callbacks);

    let is_local = location.starts_with("file://") || Path::new(location).exists();
    if shallow && !is_local {
        fetch_options.depth(1);
    }

    debug!(location, shallow = shallow && !is_local, "cloning repository");

    let mut builder = RepoBuilder::new();
    builder.fetch_options(fetch_options);
    builder
        .clone(location, target)
        .map_err(|e| fetch_failed(location, interpret_git_error(&e)))
}
