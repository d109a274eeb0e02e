//! HTTP handler: downloads the body and unpacks it by content type

use std::fs::File;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, warn};

use crate::error::{Result, fetch_failed, fs};
use crate::path_utils::make_path_safe;
use crate::source::SourceUri;

use super::archive::expand_into;
use super::session::staging_dir;
use super::{Handler, HandlerHint, StagedContent};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

pub(super) struct HttpHandler {
    client: Client,
}

impl HttpHandler {
    /// Build the client. Proxies come from the standard environment
    /// variables (`HTTPS_PROXY`, `NO_PROXY`, ...).
    pub(super) fn new(skip_ssl_validation: bool) -> Result<Self> {
        if skip_ssl_validation {
            warn!("TLS certificate validation is disabled for downloads");
        }

        let client = Client::builder()
            .user_agent(concat!("bits-migrate/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(CONNECT_TIMEOUT)
            .danger_accept_invalid_certs(skip_ssl_validation)
            .build()
            .map_err(|e| fetch_failed("http client", e.to_string()))?;

        Ok(Self { client })
    }
}

impl Handler for HttpHandler {
    fn name(&self) -> &'static str {
        "http"
    }

    fn hint(&self) -> HandlerHint {
        HandlerHint::Http
    }

    fn detect(&self, uri: &SourceUri) -> bool {
        matches!(uri.scheme(), "http" | "https")
    }

    fn stage(&self, uri: &SourceUri) -> Result<StagedContent> {
        let download_failed = |e: reqwest::Error| fetch_failed(uri.redacted(), e.to_string());

        let staging = staging_dir()?;
        let download = staging.path().join("download");

        let mut request = self.client.get(uri.transport_location().to_string());
        if let Some(credentials) = uri.credentials() {
            request = request.basic_auth(&credentials.username, credentials.password.as_ref());
        }

        let mut response = request
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(download_failed)?;

        let mut file = File::create(&download).map_err(|e| fs::at(&download, &e))?;
        let bytes = response.copy_to(&mut file).map_err(download_failed)?;
        drop(file);
        debug!(url = %uri.redacted(), bytes, "downloaded content");

        let content = staging.path().join("content");
        let name = uri
            .file_name()
            .map_or_else(|| make_path_safe(uri.host()), |name| make_path_safe(&name));
        expand_into(&download, &content, &name)?;

        Ok(StagedContent::staged(staging, content))
    }
}
