//! BLAKE3 hashing of fetched content
//!
//! The digest becomes `source_code_hash`, so it must only depend on the
//! content tree: relative paths and file bytes, never timestamps or
//! directory iteration order.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use blake3::Hasher;
use walkdir::{DirEntry, WalkDir};

use crate::error::{BitsError, Result};
use crate::path_utils::to_forward_slashes;

/// Hash prefix for BLAKE3 hashes
pub const HASH_PREFIX: &str = "blake3:";

/// Version control metadata never counts as content
pub const EXCLUDED_DIR: &str = ".git";

/// Whether a walked entry belongs to the content tree
pub fn is_content(entry: &DirEntry) -> bool {
    !(entry.file_type().is_dir() && entry.file_name() == EXCLUDED_DIR)
}

/// Calculate the BLAKE3 hash of a directory's contents
///
/// This hashes all files in the directory recursively, sorted by path
/// for deterministic results. `.git` directories are skipped.
pub fn hash_directory(path: &Path) -> Result<String> {
    if !path.is_dir() {
        return Err(BitsError::Filesystem {
            path: path.display().to_string(),
            reason: "not a directory".to_string(),
        });
    }

    let mut hasher = Hasher::new();
    let mut files: Vec<_> = WalkDir::new(path)
        .into_iter()
        .filter_entry(is_content)
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .collect();

    // Sort for deterministic hashing
    files.sort_by_key(|e| e.path().to_path_buf());

    for entry in files {
        let file_path = entry.path();

        // Include relative path in hash for uniqueness
        let relative_path = to_forward_slashes(file_path.strip_prefix(path).unwrap_or(file_path));
        hasher.update(relative_path.as_bytes());
        hasher.update(b"\0"); // null separator

        hash_file_into(&mut hasher, file_path)?;

        hasher.update(b"\0"); // null separator between files
    }

    Ok(format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex()))
}

fn hash_file_into(hasher: &mut Hasher, path: &Path) -> Result<()> {
    let read_failed = |e: std::io::Error| BitsError::Filesystem {
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    let mut reader = BufReader::new(File::open(path).map_err(read_failed)?);
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer).map_err(read_failed)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(())
}
