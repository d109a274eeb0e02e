//! Archive output paths
//!
//! Every materialized source gets a zip archive whose relative path is
//! derived from its canonical URI alone, so repeated runs over the same
//! source land on the same file. Distinct hosts and paths give distinct
//! names; accidental collisions are not guarded against.

use std::path::PathBuf;

use crate::source::SourceUri;
use crate::source::github::{GITHUB_HOST, GLARE_HOST};
use crate::source::uri::path_extension;

/// File name that replaces content-negotiation endpoints (`.../zip`, `.../tar`)
const ARCHIVE_FILE_NAME: &str = "archive.zip";

/// Extension every derived archive gets
const ZIP_EXTENSION: &str = ".zip";

/// Derive the archive path, relative to the bits directory, for `uri`.
pub fn derive(uri: &SourceUri) -> PathBuf {
    let decoded = uri.decoded_path();
    let original = decoded.as_ref();

    let mut path = if ends_in_archive_endpoint(original) {
        replace_last_segment(original, ARCHIVE_FILE_NAME)
    } else if original.is_empty() {
        String::new()
    } else {
        let stem = &original[..original.len() - path_extension(original).len()];
        format!("{stem}{ZIP_EXTENSION}")
    };

    // Proxy downloads are named as if they came from GitHub itself
    let host = match uri.host() {
        GLARE_HOST => GITHUB_HOST,
        other => other,
    };

    if !path.starts_with('/') {
        path.insert(0, '/');
    }

    if host.is_empty() {
        let name = last_segment(&path).unwrap_or(ARCHIVE_FILE_NAME);
        return PathBuf::from(name);
    }

    if original.is_empty() {
        return PathBuf::from(format!("{host}{ZIP_EXTENSION}"));
    }

    let mut derived = PathBuf::from(host);
    for segment in path.split('/') {
        if matches!(segment, "" | "." | "..") {
            continue;
        }
        derived.push(segment);
    }
    derived
}

fn ends_in_archive_endpoint(path: &str) -> bool {
    matches!(last_segment(path), Some("zip" | "tar"))
}

fn last_segment(path: &str) -> Option<&str> {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
}

fn replace_last_segment(path: &str, name: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(pos) => format!("{}/{name}", &trimmed[..pos]),
        None => name.to_string(),
    }
}
