//! Dataset registry: a static table from dataset id to resource path.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Maps dataset ids (as they appear in routes) to resource paths that a
/// [`DatasetSource`](crate::backend::DatasetSource) can fetch.
///
/// # Example
///
/// ```
/// use vitrina::DatasetRegistry;
///
/// let registry = DatasetRegistry::default();
/// assert_eq!(registry.resolve("ncsu").unwrap(), "ncsu_processed_data.csv");
/// assert!(registry.resolve("mit").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetRegistry {
    entries: BTreeMap<String, String>,
}

impl Default for DatasetRegistry {
    fn default() -> Self {
        Self::new()
            .with_dataset("ncsu", "ncsu_processed_data.csv")
            .with_dataset("stanford", "stanford_processed_data.csv")
    }
}

impl DatasetRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Adds or replaces a dataset entry.
    #[must_use]
    pub fn with_dataset(mut self, id: impl Into<String>, path: impl Into<String>) -> Self {
        self.insert(id, path);
        self
    }

    /// Adds or replaces a dataset entry in place.
    pub fn insert(&mut self, id: impl Into<String>, path: impl Into<String>) {
        self.entries.insert(id.into(), path.into());
    }

    /// Parses a registry from a JSON object of `"id": "path"` pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolves a dataset id to its resource path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownDataset`] if the id is not registered.
    pub fn resolve(&self, id: &str) -> Result<&str> {
        self.entries
            .get(id)
            .map(String::as_str)
            .ok_or_else(|| Error::unknown_dataset(id))
    }

    /// Returns true if the id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Iterates over `(id, path)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of registered datasets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no datasets are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
