//! In-memory dataset source.

use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
    time::Duration,
};

use bytes::Bytes;

use super::DatasetSource;
use crate::error::{Error, Result};

/// An in-memory dataset source.
///
/// Useful for tests and embedding fixed datasets. A per-path latency can be
/// configured to simulate slow fetches; the delay runs on the tokio timer,
/// so tests with a paused clock resolve it deterministically.
///
/// # Example
///
/// ```
/// use vitrina::backend::MemorySource;
///
/// let source = MemorySource::new();
/// source.put("ncsu.csv", "image_alt\nA cat\n");
/// assert_eq!(source.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemorySource {
    data: RwLock<HashMap<String, Bytes>>,
    latency: RwLock<HashMap<String, Duration>>,
}

impl MemorySource {
    /// Creates a new empty memory source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `data` under `path`, replacing any previous content.
    pub fn put(&self, path: impl Into<String>, data: impl Into<Bytes>) {
        self.data
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into(), data.into());
    }

    /// Delays every fetch of `path` by `delay`.
    pub fn set_latency(&self, path: impl Into<String>, delay: Duration) {
        self.latency
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into(), delay);
    }

    /// Removes the content stored under `path`.
    pub fn remove(&self, path: &str) {
        self.data
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path);
    }

    /// Returns the number of stored paths.
    pub fn len(&self) -> usize {
        self.data.read().map(|d| d.len()).unwrap_or(0)
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn latency_for(&self, path: &str) -> Option<Duration> {
        self.latency
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .copied()
    }
}

impl DatasetSource for MemorySource {
    async fn fetch(&self, path: &str) -> Result<Bytes> {
        if let Some(delay) = self.latency_for(path) {
            tokio::time::sleep(delay).await;
        }

        let data = self.data.read().unwrap_or_else(PoisonError::into_inner);
        data.get(path)
            .cloned()
            .ok_or_else(|| Error::fetch(self.location(path), "not found"))
    }

    fn location(&self, path: &str) -> String {
        format!("memory://{path}")
    }
}
