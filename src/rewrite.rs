//! Attribute rewriting from the legacy schema to `path` + `source_code_hash`

use tracing::debug;

use crate::legacy::{ADD_CONTENT_GROUP, GIT_GROUP, GITHUB_RELEASE_GROUP, URL_KEY};
use crate::materialize::BitsFragment;
use crate::state::Attributes;

pub const PATH_KEY: &str = "path";
pub const SOURCE_CODE_HASH_KEY: &str = "source_code_hash";

/// Groups whose flattened keys (`<group>.#`, `<group>.0.<field>`) are purged
const LEGACY_GROUPS: &[&str] = &[GIT_GROUP, GITHUB_RELEASE_GROUP, ADD_CONTENT_GROUP];

/// Build the migrated attribute map. Unrelated keys are carried over as is.
pub fn rewrite(attributes: &Attributes, fragment: &BitsFragment) -> Attributes {
    let mut migrated: Attributes = attributes
        .iter()
        .filter(|(key, _)| !is_legacy_key(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    migrated.insert(PATH_KEY.to_string(), fragment.path.clone());
    if let Some(hash) = &fragment.source_code_hash {
        migrated.insert(SOURCE_CODE_HASH_KEY.to_string(), hash.clone());
    }

    debug!(attributes = ?migrated.keys().collect::<Vec<_>>(), "rewrote attributes");
    migrated
}

fn is_legacy_key(key: &str) -> bool {
    key == URL_KEY
        || key == ADD_CONTENT_GROUP
        || LEGACY_GROUPS.iter().any(|group| {
            key.strip_prefix(group)
                .is_some_and(|rest| rest.starts_with('.'))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::attributes;

    fn fragment(path: &str, hash: Option<&str>) -> BitsFragment {
        BitsFragment {
            path: path.to_string(),
            source_code_hash: hash.map(str::to_string),
        }
    }

    #[test]
    fn test_rewrite_purges_legacy_keys() {
        let input = attributes(&[
            ("url", ""),
            ("git.#", "1"),
            ("git.0.url", "https://github.com/o/r.git"),
            ("git.0.branch", "main"),
            ("git.0.key", "ssh-key"),
            ("github_release.#", "0"),
            ("add_content.#", "0"),
            ("name", "my-app"),
            ("space", "space-guid"),
        ]);
        let output = rewrite(&input, &fragment("bits/github.com/o/r.zip", Some("blake3:ab")));

        assert_eq!(
            output,
            attributes(&[
                ("name", "my-app"),
                ("path", "bits/github.com/o/r.zip"),
                ("source_code_hash", "blake3:ab"),
                ("space", "space-guid"),
            ])
        );
    }

    #[test]
    fn test_rewrite_without_hash() {
        let input = attributes(&[("url", "http://a/x.zip")]);
        let output = rewrite(&input, &fragment("http://a/x.zip", None));
        assert_eq!(output, attributes(&[("path", "http://a/x.zip")]));
    }

    #[test]
    fn test_rewrite_keeps_similar_prefixes() {
        let input = attributes(&[("github", "kept"), ("gitlab.0.url", "kept"), ("urls", "kept")]);
        let output = rewrite(&input, &fragment("x", None));
        assert_eq!(output.len(), 4);
        assert_eq!(output["gitlab.0.url"], "kept");
    }

    #[test]
    fn test_rewrite_replaces_existing_path() {
        let input = attributes(&[("path", "old"), ("source_code_hash", "old")]);
        let output = rewrite(&input, &fragment("new", Some("blake3:new")));
        assert_eq!(output["path"], "new");
        assert_eq!(output["source_code_hash"], "blake3:new");
    }

    #[test]
    fn test_rewrite_leaves_input_untouched() {
        let input = attributes(&[("url", "http://a/x.zip")]);
        let before = input.clone();
        let _ = rewrite(&input, &fragment("http://a/x.zip", None));
        assert_eq!(input, before);
    }
}
