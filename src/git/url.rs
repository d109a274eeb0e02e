//! Git URL parsing
//!
//! This module handles:
//! - Normalizing SCP-style SSH URLs (`user@host:path`) to ssh:// format
//! - Parsing git URLs, including plain local paths, into a [`SourceUri`]

use std::borrow::Cow;

use crate::error::Result;
use crate::source::SourceUri;

/// Normalize SCP-style SSH URLs (`[user@]host:path`) to `ssh://[user@]host/path`.
///
/// URLs that already carry a scheme, and local paths (including Windows
/// drive paths such as `C:\repo`), are returned unchanged.
pub fn normalize_scp_url(url: &str) -> Cow<'_, str> {
    if url.contains("://") {
        return Cow::Borrowed(url);
    }

    // Find the colon that separates host from path
    let Some(colon_pos) = url.find(':') else {
        return Cow::Borrowed(url);
    };
    let host_part = &url[..colon_pos]; // git@host
    let path_part = &url[colon_pos + 1..]; // owner/repo.git

    let host = host_part.rsplit('@').next().unwrap_or(host_part);
    if host_part.contains('/') || host_part.contains('\\') || host.len() < 2 {
        return Cow::Borrowed(url);
    }

    // Colon becomes slash in the path part
    let normalized_path = if path_part.starts_with('/') {
        path_part.to_string()
    } else {
        format!("/{path_part}")
    };
    Cow::Owned(format!("ssh://{host_part}{normalized_path}"))
}

/// Parse a git repository location.
///
/// Accepts standard schemes (`https://`, `ssh://`, `git://`, `file://`, ...),
/// SCP-style `git@host:owner/repo.git`, and plain local paths, which become
/// `file` URIs without a host.
pub fn parse_git_url(input: &str) -> Result<SourceUri> {
    let input = input.trim();
    let normalized = normalize_scp_url(input);

    if normalized.contains("://") {
        return SourceUri::parse(&normalized);
    }

    Ok(SourceUri::local(input))
}
