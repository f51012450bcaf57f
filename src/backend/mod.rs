//! Dataset sources for vitrina.
//!
//! A [`DatasetSource`] fetches the raw delimited text behind a resource path
//! produced by the [`DatasetRegistry`](crate::registry::DatasetRegistry).
//! Implementations exist for HTTP(S), the local filesystem, and in-memory
//! buffers.
//!
//! Fetching is the only asynchronous step in the pipeline. Every fetch is a
//! single attempt; failures surface as [`Error::Fetch`](crate::Error::Fetch)
//! and are never retried here.

#[cfg(feature = "http")]
pub mod http;
pub mod local;
pub mod memory;

use std::{future::Future, path::PathBuf};

use bytes::Bytes;
#[cfg(feature = "http")]
pub use http::HttpSource;
pub use local::LocalSource;
pub use memory::MemorySource;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default request timeout for HTTP sources, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A source of raw dataset text.
pub trait DatasetSource: Send + Sync {
    /// Fetches the full content stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fetch`](crate::Error::Fetch) if the resource is
    /// unreachable or the request does not succeed.
    fn fetch(&self, path: &str) -> impl Future<Output = Result<Bytes>> + Send;

    /// Describes where `path` points, for logs and error messages.
    fn location(&self, path: &str) -> String;
}

/// Configuration for dataset sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    /// Files under a local directory.
    Local {
        /// Root directory that resource paths are relative to.
        root: PathBuf,
    },
    /// Files served over HTTP(S) (requires `http` feature).
    Http {
        /// Base URL that resource paths are appended to.
        base_url: String,
        /// Request timeout in seconds.
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::local("data")
    }
}

impl SourceConfig {
    /// Creates a local source configuration.
    pub fn local(root: impl Into<PathBuf>) -> Self {
        Self::Local { root: root.into() }
    }

    /// Creates an HTTP source configuration with the default timeout.
    pub fn http(base_url: impl Into<String>) -> Self {
        Self::Http {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// A source chosen at runtime from a [`SourceConfig`].
#[derive(Debug)]
pub enum AnySource {
    /// Local filesystem source.
    Local(LocalSource),
    /// HTTP(S) source.
    #[cfg(feature = "http")]
    Http(HttpSource),
    /// In-memory source.
    Memory(MemorySource),
}

impl DatasetSource for AnySource {
    async fn fetch(&self, path: &str) -> Result<Bytes> {
        match self {
            Self::Local(source) => source.fetch(path).await,
            #[cfg(feature = "http")]
            Self::Http(source) => source.fetch(path).await,
            Self::Memory(source) => source.fetch(path).await,
        }
    }

    fn location(&self, path: &str) -> String {
        match self {
            Self::Local(source) => source.location(path),
            #[cfg(feature = "http")]
            Self::Http(source) => source.location(path),
            Self::Memory(source) => source.location(path),
        }
    }
}

/// Creates a dataset source from configuration.
///
/// # Errors
///
/// Returns an error if the source cannot be created, or if an HTTP source
/// is requested without the `http` feature.
pub fn create_source(config: SourceConfig) -> Result<AnySource> {
    match config {
        SourceConfig::Local { root } => Ok(AnySource::Local(LocalSource::new(root))),
        #[cfg(feature = "http")]
        SourceConfig::Http {
            base_url,
            timeout_secs,
        } => Ok(AnySource::Http(HttpSource::with_timeout(
            base_url,
            timeout_secs,
        )?)),
        #[cfg(not(feature = "http"))]
        SourceConfig::Http { .. } => Err(crate::error::Error::invalid_config(
            "HTTP source requires 'http' feature",
        )),
    }
}
