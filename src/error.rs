//! Error types for vitrina.

use std::path::PathBuf;

/// Result type alias for vitrina operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in vitrina operations.
///
/// Only load failures and configuration mistakes surface as errors. Row-level
/// anomalies (malformed records, missing fields, failed numeric coercion) are
/// absorbed where they happen.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The dataset resource was unreachable or answered with a non-success
    /// status.
    #[error("Failed to fetch '{resource}': {message}")]
    Fetch {
        /// The resource path or URL that was requested.
        resource: String,
        /// Description of the failure.
        message: String,
    },

    /// The dataset text has no usable header line.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
    },

    /// The dataset id is not present in the registry.
    #[error("No such dataset: '{id}'")]
    UnknownDataset {
        /// The requested dataset id.
        id: String,
    },

    /// A page size outside the allowed set.
    #[error("Invalid page size {value} (allowed: 10, 20, 50, 100)")]
    InvalidPageSize {
        /// The rejected value.
        value: usize,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration error.
        message: String,
    },

    /// I/O error while reading or writing local files.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        /// The path where the error occurred, if known.
        path: Option<PathBuf>,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// JSON error in a configuration or preference file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a fetch error for a resource.
    pub fn fetch(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            resource: resource.into(),
            message: message.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create an unknown dataset error.
    pub fn unknown_dataset(id: impl Into<String>) -> Self {
        Self::UnknownDataset { id: id.into() }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an I/O error with a path context.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            path: Some(path.into()),
            source,
        }
    }

    /// Create an I/O error without path context.
    pub fn io_no_path(source: std::io::Error) -> Self {
        Self::Io { path: None, source }
    }

    /// Returns true for errors that are rejected before the pipeline runs.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownDataset { .. } | Self::InvalidPageSize { .. } | Self::InvalidConfig { .. }
        )
    }

    /// Returns true for errors that mean "failed to load dataset".
    pub fn is_load_error(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::Parse { .. })
    }
}
