//! Legacy ("bits v2") source descriptors
//!
//! The old schema described application content in one of three mutually
//! exclusive ways:
//! - `url`: a raw URL or local path
//! - `git`: a repository with optional branch, tag and credentials
//! - `github_release`: a release asset or source archive of a GitHub repository
//!
//! plus an `add_content` overlay list that cannot be migrated.
//!
//! ## Module Organization
//!
//! - `mod.rs`: The decoded descriptor types
//! - `reader.rs`: Decoding from the flattened state attribute map

pub mod reader;

pub use reader::read;

/// Top-level attribute holding a raw URL
pub const URL_KEY: &str = "url";

/// Nested list group holding a git descriptor
pub const GIT_GROUP: &str = "git";

/// Nested list group holding a GitHub release descriptor
pub const GITHUB_RELEASE_GROUP: &str = "github_release";

/// Nested list group holding the unsupported content overlay
pub const ADD_CONTENT_GROUP: &str = "add_content";

/// Git repository descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitSpec {
    pub url: String,
    pub branch: String,
    pub tag: String,
    pub user: String,
    pub password: String,
}

/// Asset selector of a GitHub release descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseAsset {
    /// Source archive as zip (`zipball`)
    Zipball,
    /// Source archive as gzipped tar (`tarball`)
    Tarball,
    /// A named release asset
    File(String),
}

impl ReleaseAsset {
    pub fn parse(filename: &str) -> Self {
        match filename {
            "zipball" => ReleaseAsset::Zipball,
            "tarball" => ReleaseAsset::Tarball,
            other => ReleaseAsset::File(other.to_string()),
        }
    }
}

/// GitHub release descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubReleaseSpec {
    pub owner: String,
    pub repo: String,
    pub user: String,
    pub password: String,
    /// Release tag; empty selects the latest release
    pub version: String,
    pub asset: ReleaseAsset,
}

/// The one active source descriptor of a legacy resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegacySource {
    DirectUrl(String),
    Git(GitSpec),
    GithubRelease(GithubReleaseSpec),
    None,
}

impl LegacySource {
    /// Pick the active descriptor when several are populated.
    ///
    /// A non-empty URL wins over a git block, which wins over a GitHub
    /// release block. Lower-priority descriptors are dropped silently.
    pub fn select(
        url: String,
        git: Option<GitSpec>,
        github_release: Option<GithubReleaseSpec>,
    ) -> Self {
        if !url.is_empty() {
            return LegacySource::DirectUrl(url);
        }
        if let Some(git) = git {
            return LegacySource::Git(git);
        }
        match github_release {
            Some(release) => LegacySource::GithubRelease(release),
            None => LegacySource::None,
        }
    }

    /// Short label used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            LegacySource::DirectUrl(_) => "url",
            LegacySource::Git(_) => GIT_GROUP,
            LegacySource::GithubRelease(_) => GITHUB_RELEASE_GROUP,
            LegacySource::None => "none",
        }
    }
}

/// Everything the migration needs from the legacy attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyBits {
    pub source: LegacySource,
    pub has_add_content: bool,
}
