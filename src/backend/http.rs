//! HTTP/HTTPS dataset source.
//!
//! Fetches dataset files from a static web server, the way the gallery
//! front end requests `/data/<file>.csv`.

use std::time::Duration;

use bytes::Bytes;
use reqwest::Client;

use super::{DatasetSource, DEFAULT_TIMEOUT_SECS};
use crate::error::{Error, Result};

const USER_AGENT: &str = concat!("vitrina/", env!("CARGO_PKG_VERSION"));

/// A read-only dataset source over HTTP/HTTPS.
///
/// Each fetch is one GET request with a timeout. Non-success statuses and
/// transport failures both become [`Error::Fetch`]; nothing is retried.
///
/// # Example
///
/// ```no_run
/// use vitrina::backend::HttpSource;
///
/// let source = HttpSource::new("https://gallery.example.org/data").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    /// Creates a new HTTP source with the default request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a new HTTP source with a custom request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_timeout(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let base_url = base_url.into();
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::invalid_config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Constructs the full URL for a resource path.
    fn url_for(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if self.base_url.ends_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

impl DatasetSource for HttpSource {
    async fn fetch(&self, path: &str) -> Result<Bytes> {
        let url = self.url_for(path);
        log::debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::fetch(&url, e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::fetch(&url, format!("status {}", response.status())));
        }

        response
            .bytes()
            .await
            .map_err(|e| Error::fetch(&url, format!("failed to read response body: {e}")))
    }

    fn location(&self, path: &str) -> String {
        self.url_for(path)
    }
}
