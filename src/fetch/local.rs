//! Local handler: directories are read in place, files are unpacked or
//! copied into a staging tree

use std::path::Path;

use crate::error::{Result, fetch_failed};
use crate::path_utils::make_path_safe;
use crate::source::SourceUri;

use super::archive::expand_into;
use super::session::staging_dir;
use super::{Handler, HandlerHint, StagedContent};

pub(super) struct LocalHandler;

impl Handler for LocalHandler {
    fn name(&self) -> &'static str {
        "local"
    }

    fn hint(&self) -> HandlerHint {
        HandlerHint::Local
    }

    fn detect(&self, uri: &SourceUri) -> bool {
        !uri.has_host() && matches!(uri.scheme(), "" | "file")
    }

    fn stage(&self, uri: &SourceUri) -> Result<StagedContent> {
        let decoded = uri.decoded_path();
        let path = Path::new(decoded.as_ref());

        if path.is_dir() {
            return Ok(StagedContent::in_place(path));
        }
        if !path.is_file() {
            return Err(fetch_failed(uri.redacted(), "no such file or directory"));
        }

        let staging = staging_dir()?;
        let content = staging.path().join("content");
        let name = make_path_safe(&uri.file_name().unwrap_or_default());
        expand_into(path, &content, &name)?;

        Ok(StagedContent::staged(staging, content))
    }
}
