//! Gallery configuration.
//!
//! Read from a JSON file; every field is optional:
//!
//! ```json
//! {
//!   "source": { "kind": "http", "base_url": "https://example.org/data", "timeout_secs": 10 },
//!   "datasets": { "ncsu": "ncsu_processed_data.csv" },
//!   "shuffle": true,
//!   "seed": 42,
//!   "text_field": "article_title",
//!   "extra_stopwords": ["news"],
//!   "zoom_step": 0.1,
//!   "preferences_path": "prefs.json"
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    analytics::{StopwordSet, TextAnalyzer},
    backend::SourceConfig,
    dataset::fields,
    error::{Error, Result},
    registry::DatasetRegistry,
    shuffle::Shuffler,
    view::{GalleryState, DEFAULT_ZOOM_STEP},
};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Where dataset files come from.
    pub source: SourceConfig,
    /// Dataset id to resource path table.
    pub datasets: DatasetRegistry,
    /// Shuffle rows on every install.
    pub shuffle: bool,
    /// Seed for reproducible shuffles; entropy when absent.
    pub seed: Option<u64>,
    /// Field fed to the word cloud.
    pub text_field: String,
    /// Stopwords added to the English list.
    pub extra_stopwords: Vec<String>,
    /// Zoom step of the word cloud.
    pub zoom_step: f64,
    /// File for persisted preferences; kept in memory when absent.
    pub preferences_path: Option<PathBuf>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            datasets: DatasetRegistry::default(),
            shuffle: false,
            seed: None,
            text_field: fields::ARTICLE_TITLE.to_string(),
            extra_stopwords: Vec::new(),
            zoom_step: DEFAULT_ZOOM_STEP,
            preferences_path: None,
        }
    }
}

impl GalleryConfig {
    /// Parses and validates a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] for malformed JSON and
    /// [`Error::InvalidConfig`] for values that fail [`validate`](Self::validate).
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, otherwise as
    /// [`from_json_str`](Self::from_json_str).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| Error::io(e, path))?;
        Self::from_json_str(&json)
    }

    /// Checks values that deserialize fine but cannot work.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        match &self.source {
            SourceConfig::Local { root } if root.as_os_str().is_empty() => {
                return Err(Error::invalid_config("source.root must not be empty"));
            }
            SourceConfig::Http { base_url, .. } if base_url.trim().is_empty() => {
                return Err(Error::invalid_config("source.base_url must not be empty"));
            }
            SourceConfig::Http { timeout_secs: 0, .. } => {
                return Err(Error::invalid_config("source.timeout_secs must be positive"));
            }
            _ => {}
        }
        if self.datasets.is_empty() {
            return Err(Error::invalid_config("datasets must not be empty"));
        }
        if self.text_field.trim().is_empty() {
            return Err(Error::invalid_config("text_field must not be empty"));
        }
        if !(self.zoom_step.is_finite() && self.zoom_step > 0.0) {
            return Err(Error::invalid_config(format!(
                "zoom_step must be positive, got {}",
                self.zoom_step
            )));
        }
        Ok(())
    }

    /// Builds the stopword set: English plus the configured extras.
    pub fn stopwords(&self) -> StopwordSet {
        StopwordSet::english().with_words(&self.extra_stopwords)
    }

    /// Builds a [`GalleryState`] with the configured shuffle, analyzer and
    /// zoom step.
    pub fn gallery_state(&self) -> GalleryState {
        let analyzer = TextAnalyzer::new(self.text_field.clone(), self.stopwords());
        let state = GalleryState::new()
            .with_analyzer(analyzer)
            .with_zoom_step(self.zoom_step);
        if !self.shuffle {
            return state;
        }
        let shuffler = match self.seed {
            Some(seed) => Shuffler::with_seed(seed),
            None => Shuffler::new(),
        };
        state.with_shuffler(shuffler)
    }
}
