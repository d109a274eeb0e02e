//! Content fetching
//!
//! A [`ContentFetcher`] turns a source URI into a [`Session`] over the
//! fetched content tree. The session yields the tree's digest and a zip
//! archive of it. The default [`Fetcher`] dispatches to one of three
//! handlers:
//!
//! | Handler | Selected for |
//! |---|---|
//! | git | `git`, `ssh`, `git+ssh`, `git+https`, `git+http`; paths ending in `.git`; http(s) URLs with a ref fragment |
//! | http | `http`, `https` |
//! | local | URIs without a host (`file` scheme or none) |
//!
//! Callers may force a handler with a [`HandlerHint`].

pub mod archive;
mod git;
mod http;
mod local;
mod session;

use std::io::Read;

use tracing::debug;

use crate::config::MigrationConfig;
use crate::error::{Result, unsupported_scheme};
use crate::source::SourceUri;

pub use session::{StagedContent, TreeSession};

/// Which handler should serve a URI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerHint {
    /// Pick the handler from the URI itself
    Infer,
    Local,
    Git,
    Http,
}

impl HandlerHint {
    /// Hint used when materializing `uri`: host-less URIs are local paths
    pub fn for_uri(uri: &SourceUri) -> Self {
        if uri.has_host() {
            HandlerHint::Infer
        } else {
            HandlerHint::Local
        }
    }
}

/// An open view of fetched content. Dropping the session removes any
/// staged files.
pub trait Session {
    /// Content digest of the fetched tree (`blake3:<hex>`)
    fn digest(&mut self) -> Result<String>;

    /// Readable zip archive of the fetched tree
    fn zip_stream(&mut self) -> Result<Box<dyn Read>>;
}

/// Opens sessions over remote or local content
pub trait ContentFetcher {
    fn open_session(&self, uri: &SourceUri, hint: HandlerHint) -> Result<Box<dyn Session>>;
}

/// One transport the default fetcher can use
trait Handler {
    fn name(&self) -> &'static str;

    /// The hint that forces this handler
    fn hint(&self) -> HandlerHint;

    /// Whether this handler recognizes `uri` on its own
    fn detect(&self, uri: &SourceUri) -> bool;

    /// Fetch `uri` into a content tree
    fn stage(&self, uri: &SourceUri) -> Result<StagedContent>;
}

/// Multi-protocol fetcher backed by git, http and local handlers
pub struct Fetcher {
    handlers: Vec<Box<dyn Handler>>,
}

impl Fetcher {
    pub fn new(config: &MigrationConfig) -> Result<Self> {
        Ok(Self {
            handlers: vec![
                Box::new(git::GitHandler),
                Box::new(http::HttpHandler::new(config.skip_ssl_validation)?),
                Box::new(local::LocalHandler),
            ],
        })
    }

    fn handler_for(&self, uri: &SourceUri, hint: HandlerHint) -> Result<&dyn Handler> {
        self.handlers
            .iter()
            .map(|handler| &**handler)
            .find(|handler| match hint {
                HandlerHint::Infer => handler.detect(uri),
                forced => handler.hint() == forced,
            })
            .ok_or_else(|| unsupported_scheme(uri.scheme()))
    }
}

impl ContentFetcher for Fetcher {
    fn open_session(&self, uri: &SourceUri, hint: HandlerHint) -> Result<Box<dyn Session>> {
        let handler = self.handler_for(uri, hint)?;
        debug!(handler = handler.name(), url = %uri.redacted(), "fetching content");

        let content = handler.stage(uri)?;
        Ok(Box::new(TreeSession::new(content)))
    }
}
