//! Legacy attribute decoding
//!
//! State attributes are a flat string map. Nested lists of structs are
//! flattened with indexed keys: `git.#` holds the element count and
//! `git.0.url` the `url` field of the first element. This module is the
//! only place that knows about that encoding.

use crate::error::{Result, schema_decode_failed};
use crate::state::Attributes;

use super::{
    ADD_CONTENT_GROUP, GIT_GROUP, GITHUB_RELEASE_GROUP, GitSpec, GithubReleaseSpec, LegacyBits,
    LegacySource, ReleaseAsset, URL_KEY,
};

/// A flattened list-of-struct attribute
struct FlatList<'a> {
    attributes: &'a Attributes,
    group: &'static str,
}

impl<'a> FlatList<'a> {
    fn new(attributes: &'a Attributes, group: &'static str) -> Self {
        Self { attributes, group }
    }

    /// Number of elements; an absent count means an empty list
    fn count(&self) -> Result<usize> {
        let key = format!("{}.#", self.group);
        match self.attributes.get(&key) {
            None => Ok(0),
            Some(raw) => raw.parse::<usize>().map_err(|_| {
                schema_decode_failed(key, format!("list count '{raw}' is not a number"))
            }),
        }
    }

    fn field_key(&self, name: &str) -> String {
        format!("{}.0.{name}", self.group)
    }

    /// A field of the first element that must be present
    fn required(&self, name: &str) -> Result<String> {
        let key = self.field_key(name);
        self.attributes
            .get(&key)
            .cloned()
            .ok_or_else(|| schema_decode_failed(key, "required field is missing"))
    }

    /// A field of the first element, empty when absent
    fn optional(&self, name: &str) -> String {
        self.attributes
            .get(&self.field_key(name))
            .cloned()
            .unwrap_or_default()
    }
}

/// Decode the legacy source descriptors and the `add_content` flag.
///
/// All three descriptors are decoded before one is selected, so a
/// malformed lower-priority block still fails the read.
pub fn read(attributes: &Attributes) -> Result<LegacyBits> {
    let url = attributes.get(URL_KEY).cloned().unwrap_or_default();
    let git = read_git(attributes)?;
    let github_release = read_github_release(attributes)?;
    let has_add_content = FlatList::new(attributes, ADD_CONTENT_GROUP).count()? > 0;

    Ok(LegacyBits {
        source: LegacySource::select(url, git, github_release),
        has_add_content,
    })
}

fn read_git(attributes: &Attributes) -> Result<Option<GitSpec>> {
    let list = FlatList::new(attributes, GIT_GROUP);
    if list.count()? == 0 {
        return Ok(None);
    }

    Ok(Some(GitSpec {
        url: list.required("url")?,
        branch: list.optional("branch"),
        tag: list.optional("tag"),
        user: list.optional("user"),
        password: list.optional("password"),
    }))
}

fn read_github_release(attributes: &Attributes) -> Result<Option<GithubReleaseSpec>> {
    let list = FlatList::new(attributes, GITHUB_RELEASE_GROUP);
    if list.count()? == 0 {
        return Ok(None);
    }

    Ok(Some(GithubReleaseSpec {
        owner: list.required("owner")?,
        repo: list.required("repo")?,
        user: list.optional("user"),
        password: list.optional("password"),
        version: list.optional("version"),
        asset: ReleaseAsset::parse(&list.required("filename")?),
    }))
}
