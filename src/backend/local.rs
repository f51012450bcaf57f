//! Local filesystem dataset source.

use std::path::{Component, Path, PathBuf};

use bytes::Bytes;

use super::DatasetSource;
use crate::error::{Error, Result};

/// A dataset source reading files under a root directory.
///
/// Resource paths are relative to the root. Absolute paths and paths that
/// climb out of the root with `..` are rejected.
///
/// # Example
///
/// ```no_run
/// use vitrina::backend::LocalSource;
///
/// let source = LocalSource::new("public/data");
/// ```
#[derive(Debug, Clone)]
pub struct LocalSource {
    root: PathBuf,
}

impl LocalSource {
    /// Creates a new local source rooted at `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Returns the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a resource path to a full filesystem path.
    fn resolve_path(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            None
        } else {
            Some(self.root.join(relative))
        }
    }
}

impl DatasetSource for LocalSource {
    async fn fetch(&self, path: &str) -> Result<Bytes> {
        let full_path = self
            .resolve_path(path)
            .ok_or_else(|| Error::fetch(path, "path escapes the data root"))?;

        let data = tokio::fs::read(&full_path)
            .await
            .map_err(|e| Error::fetch(full_path.display().to_string(), e.to_string()))?;
        Ok(Bytes::from(data))
    }

    fn location(&self, path: &str) -> String {
        self.root.join(path).display().to_string()
    }
}
