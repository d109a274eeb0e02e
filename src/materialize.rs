//! Artifact materialization
//!
//! Remote zip archives are referenced where they are. Every other source is
//! fetched, hashed and written as a zip archive under the bits directory.

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, fs};
use crate::fetch::{ContentFetcher, HandlerHint};
use crate::output_path::derive;
use crate::source::SourceUri;

/// The v3 attribute values produced for one source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitsFragment {
    /// Remote URL or local archive path
    pub path: String,

    /// Content digest; absent for remote zip references
    pub source_code_hash: Option<String>,
}

/// Whether `uri` is a zip archive that can be referenced remotely as is
pub fn is_remote_zip(uri: &SourceUri) -> bool {
    matches!(uri.scheme(), "http" | "https") && uri.extension() == ".zip"
}

/// Writes fetched content as archives under a bits directory
pub struct Materializer<'a> {
    fetcher: &'a dyn ContentFetcher,
    bits_dir: &'a Path,
}

impl<'a> Materializer<'a> {
    pub fn new(fetcher: &'a dyn ContentFetcher, bits_dir: &'a Path) -> Self {
        Self { fetcher, bits_dir }
    }

    /// Archive location for `uri`, inside the bits directory
    pub fn output_path(&self, uri: &SourceUri) -> PathBuf {
        self.bits_dir.join(derive(uri))
    }

    /// Produce the `path` and `source_code_hash` values for `uri`.
    ///
    /// An existing archive at the output path is overwritten.
    pub fn materialize(&self, uri: &SourceUri) -> Result<BitsFragment> {
        if is_remote_zip(uri) {
            debug!(url = %uri.redacted(), "referencing remote zip directly");
            return Ok(BitsFragment {
                path: uri.to_string(),
                source_code_hash: None,
            });
        }

        let mut session = self.fetcher.open_session(uri, HandlerHint::for_uri(uri))?;
        let digest = session.digest()?;

        let output = self.output_path(uri);
        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent).map_err(|e| fs::at(parent, &e))?;
        }
        debug!(output = %output.display(), "writing archive");

        let mut stream = session.zip_stream()?;
        let mut file = File::create(&output).map_err(|e| fs::at(&output, &e))?;
        std::io::copy(&mut stream, &mut file).map_err(|e| fs::at(&output, &e))?;

        Ok(BitsFragment {
            path: output.to_string_lossy().into_owned(),
            source_code_hash: Some(digest),
        })
    }
}
