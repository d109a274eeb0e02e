//! GitHub release URLs
//!
//! A release descriptor with a version points at github.com directly.
//! Without a version it goes through the glare proxy, which redirects to
//! the matching asset of the latest release.

use crate::legacy::{GithubReleaseSpec, ReleaseAsset};

/// Host of the latest-release proxy
pub const GLARE_HOST: &str = "glare.now.sh";

/// Host the proxy stands in for
pub const GITHUB_HOST: &str = "github.com";

/// Build the download URL for a release descriptor
pub fn release_url(release: &GithubReleaseSpec) -> String {
    let GithubReleaseSpec {
        owner,
        repo,
        version,
        ..
    } = release;

    if version.is_empty() {
        return match &release.asset {
            ReleaseAsset::Zipball => format!("https://{GLARE_HOST}/{owner}/{repo}/zip"),
            ReleaseAsset::Tarball => format!("https://{GLARE_HOST}/{owner}/{repo}/tar"),
            ReleaseAsset::File(filename) => {
                format!("https://{GLARE_HOST}/{owner}/{repo}/{filename}")
            }
        };
    }

    match &release.asset {
        ReleaseAsset::Zipball => {
            format!("https://{GITHUB_HOST}/{owner}/{repo}/archive/{version}.zip")
        }
        ReleaseAsset::Tarball => {
            format!("https://{GITHUB_HOST}/{owner}/{repo}/archive/{version}.tar.gz")
        }
        ReleaseAsset::File(filename) => {
            format!("https://{GITHUB_HOST}/{owner}/{repo}/releases/download/{version}/{filename}")
        }
    }
}
