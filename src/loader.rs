//! Dataset loader: resolve, fetch, parse.

use crate::{
    backend::DatasetSource,
    dataset::{CsvOptions, Dataset},
    error::Result,
    registry::DatasetRegistry,
};

/// Loads named datasets through a registry and a source.
///
/// Loading has no side effects beyond returning the [`Dataset`]; installing
/// it is the caller's job (see [`GalleryState`](crate::view::GalleryState)).
///
/// # Example
///
/// ```
/// use vitrina::{backend::MemorySource, DatasetLoader, DatasetRegistry};
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
/// let source = MemorySource::new();
/// source.put("ncsu_processed_data.csv", "article_title\nCampus news\n");
///
/// let loader = DatasetLoader::new(DatasetRegistry::default(), source);
/// let dataset = loader.load("ncsu").await.unwrap();
/// assert_eq!(dataset.len(), 1);
/// # });
/// ```
#[derive(Debug)]
pub struct DatasetLoader<S> {
    registry: DatasetRegistry,
    source: S,
    csv_options: CsvOptions,
}

impl<S: DatasetSource> DatasetLoader<S> {
    /// Creates a loader with default CSV options.
    pub fn new(registry: DatasetRegistry, source: S) -> Self {
        Self {
            registry,
            source,
            csv_options: CsvOptions::default(),
        }
    }

    /// Sets the CSV options used for parsing.
    #[must_use]
    pub fn with_csv_options(mut self, options: CsvOptions) -> Self {
        self.csv_options = options;
        self
    }

    /// Returns the registry.
    pub fn registry(&self) -> &DatasetRegistry {
        &self.registry
    }

    /// Returns the source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Resolves, fetches and parses the dataset named `dataset_id`.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownDataset`](crate::Error::UnknownDataset) if the id is
    ///   not registered (no fetch is attempted)
    /// - [`Error::Fetch`](crate::Error::Fetch) if the resource cannot be
    ///   retrieved
    /// - [`Error::Parse`](crate::Error::Parse) if the text has no header
    pub async fn load(&self, dataset_id: &str) -> Result<Dataset> {
        let path = self.registry.resolve(dataset_id)?;
        log::debug!(
            "loading dataset '{dataset_id}' from {}",
            self.source.location(path)
        );

        let raw = self.source.fetch(path).await?;
        let dataset = Dataset::from_csv_bytes(&raw, &self.csv_options)?;

        log::info!(
            "loaded dataset '{dataset_id}': {} rows, {} fields",
            dataset.len(),
            dataset.header().len()
        );
        Ok(dataset)
    }
}
