//! Sessions over staged content trees

use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::{Result, fs};
use crate::hash::hash_directory;
use crate::temp::temp_dir_base;

use super::Session;
use super::archive::write_zip;

/// Root of a fetched content tree, plus the staging directory that holds
/// it when the content had to be downloaded or unpacked.
#[derive(Debug)]
pub struct StagedContent {
    root: PathBuf,
    _staging: Option<TempDir>,
}

impl StagedContent {
    /// Content that already exists on disk and is read where it is
    pub fn in_place(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            _staging: None,
        }
    }

    /// Content under `root` inside `staging`; removed when dropped
    pub fn staged(staging: TempDir, root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            _staging: Some(staging),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Create a fresh staging directory outside the working directory
pub(super) fn staging_dir() -> Result<TempDir> {
    let base = temp_dir_base();
    tempfile::Builder::new()
        .prefix("bits-migrate-")
        .tempdir_in(&base)
        .map_err(|e| fs::at(&base, &e))
}

/// [`Session`] over a content tree on disk
#[derive(Debug)]
pub struct TreeSession {
    content: StagedContent,
    digest: Option<String>,
}

impl TreeSession {
    pub fn new(content: StagedContent) -> Self {
        Self {
            content,
            digest: None,
        }
    }
}

impl Session for TreeSession {
    fn digest(&mut self) -> Result<String> {
        if let Some(digest) = &self.digest {
            return Ok(digest.clone());
        }
        let digest = hash_directory(self.content.root())?;
        self.digest = Some(digest.clone());
        Ok(digest)
    }

    fn zip_stream(&mut self) -> Result<Box<dyn Read>> {
        let base = temp_dir_base();
        let file = tempfile::tempfile_in(&base).map_err(|e| fs::at(&base, &e))?;
        let mut file = write_zip(self.content.root(), file)?;
        file.seek(SeekFrom::Start(0))
            .map_err(|e| fs::at(self.content.root(), &e))?;
        Ok(Box::new(file))
    }
}
