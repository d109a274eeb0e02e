//! Source resolution
//!
//! Turns the active legacy descriptor into exactly one [`SourceUri`].

use tracing::debug;

use crate::error::Result;
use crate::git::url::parse_git_url;
use crate::legacy::{GitSpec, GithubReleaseSpec, LegacySource};

use super::github::release_url;
use super::uri::{Credentials, SourceUri};

/// Literal prefix stripped from raw URLs so they parse as local paths
const FILE_PREFIX: &str = "file://";

/// Resolve a legacy descriptor to its canonical URI.
///
/// Returns `Ok(None)` when no descriptor is configured; that is not an
/// error, the resource simply has nothing to migrate.
pub fn resolve(source: &LegacySource) -> Result<Option<SourceUri>> {
    let uri = match source {
        LegacySource::DirectUrl(raw) => resolve_raw_url(raw)?,
        LegacySource::Git(git) => resolve_git(git)?,
        LegacySource::GithubRelease(release) => resolve_github_release(release)?,
        LegacySource::None => return Ok(None),
    };

    debug!(kind = source.kind(), url = %uri.redacted(), "resolved bits source");
    Ok(Some(uri))
}

fn resolve_raw_url(raw: &str) -> Result<SourceUri> {
    let raw = raw.strip_prefix(FILE_PREFIX).unwrap_or(raw);
    SourceUri::parse(raw)
}

/// Git refs travel in the fragment. Branch and tag are concatenated with no
/// separator, so a descriptor that sets both selects `branch ++ tag`.
fn resolve_git(git: &GitSpec) -> Result<SourceUri> {
    let mut uri = parse_git_url(&git.url)?;

    if !git.branch.is_empty() || !git.tag.is_empty() {
        uri = uri.with_fragment(format!("{}{}", git.branch, git.tag));
    }
    if !git.user.is_empty() {
        uri = uri.with_credentials(Credentials::new(&git.user, &git.password));
    }
    Ok(uri)
}

fn resolve_github_release(release: &GithubReleaseSpec) -> Result<SourceUri> {
    let mut uri = SourceUri::parse(&release_url(release))?;

    if !release.user.is_empty() {
        uri = uri.with_credentials(Credentials::new(&release.user, &release.password));
    }
    Ok(uri)
}
