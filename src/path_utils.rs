//! Cross-platform path utilities
//!
//! Archive entry names and content digests always use forward slashes,
//! whatever the platform's separator.

use std::path::Path;

/// Characters that are unsafe in file names
/// Replaced with hyphens and collapsed: `/`, `\`, `:`, `*`, `?`, `"`, `<`, `>`, `|`
const PATH_UNSAFE_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Convert a path to a string with forward slashes.
///
/// ```
/// use std::path::Path;
/// use bits_migrate::path_utils::to_forward_slashes;
///
/// assert_eq!(to_forward_slashes(Path::new("a\\b/c.txt")), "a/b/c.txt");
/// ```
pub fn to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Make a URL component safe to use as a single file name.
///
/// Replaces characters that are invalid on Windows or problematic in paths
/// with hyphens, collapses runs of hyphens and trims them at both ends.
/// Returns "download" if nothing is left.
///
/// ```
/// use bits_migrate::path_utils::make_path_safe;
///
/// assert_eq!(make_path_safe("example.com:8080"), "example.com-8080");
/// assert_eq!(make_path_safe(":::"), "download");
/// ```
pub fn make_path_safe(name: &str) -> String {
    let key: String = name
        .chars()
        .map(|c| {
            if PATH_UNSAFE_CHARS.contains(&c) {
                '-'
            } else {
                c
            }
        })
        .collect();

    let key = key
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if key.is_empty() {
        "download".to_string()
    } else {
        key
    }
}
