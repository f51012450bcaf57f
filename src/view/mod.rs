//! View-state coordinator.
//!
//! [`GalleryState`] owns everything the gallery page shows: the installed
//! rows, the search query, the page position, the word frequencies of the
//! filtered rows, and the word-cloud zoom. Derived data is recomputed in full
//! whenever an input changes:
//!
//! | Change        | Filtered rows | Page index | Frequencies |
//! |---------------|---------------|------------|-------------|
//! | install       | recomputed    | 0          | recomputed  |
//! | query         | recomputed    | 0          | recomputed  |
//! | page size     | -             | 0          | -           |
//! | page click    | -             | set        | -           |
//! | zoom          | -             | -          | -           |
//!
//! Loads are asynchronous, so a slow load could finish after a later one.
//! Each [`GalleryState::begin_load`] hands out a [`LoadTicket`] stamped with
//! a new generation; only the ticket of the latest generation may install.

mod session;
pub mod zoom;

use std::fmt;

use serde::Serialize;
pub use session::Session;
pub use zoom::{Zoom, DEFAULT_ZOOM_STEP};

use crate::{
    analytics::{TextAnalyzer, WordFrequencies},
    dataset::{Dataset, Row},
    error::{Error, Result},
    filter::SearchFilter,
    paginate::{page_count, paginate, Page, PageSize},
    shuffle::Shuffler,
};

/// Callback invoked with the token of a clicked word.
pub type WordClickHandler = Box<dyn Fn(&str) + Send + Sync>;

/// Progress of the most recent load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadStatus {
    /// Nothing has been requested yet.
    #[default]
    Idle,
    /// A load is in flight.
    Loading {
        /// The dataset being loaded.
        dataset_id: String,
    },
    /// The dataset is installed.
    Ready {
        /// The installed dataset.
        dataset_id: String,
    },
    /// The latest load failed; previously installed rows stay visible.
    Failed {
        /// The dataset that failed to load.
        dataset_id: String,
        /// Error description.
        message: String,
    },
}

/// Proof that a load was started, consumed when it completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    dataset_id: String,
}

impl LoadTicket {
    /// The generation this load belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The requested dataset id.
    pub fn dataset_id(&self) -> &str {
        &self.dataset_id
    }
}

/// A read-only snapshot for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    /// Rows of the current page.
    pub rows: Vec<Row>,
    /// Current page (zero-based).
    pub page_index: usize,
    /// Number of pages, at least one.
    pub page_count: usize,
    /// Rows in the installed dataset.
    pub total_rows: usize,
    /// Rows matching the query.
    pub filtered_rows: usize,
    /// Word frequencies of the filtered rows.
    pub word_frequencies: WordFrequencies,
    /// Word-cloud zoom factor.
    pub zoom: f64,
    /// Load progress.
    pub status: LoadStatus,
    /// Current query.
    pub query: String,
    /// Rows per page.
    pub page_size: PageSize,
}

/// Interaction state of the gallery page.
///
/// # Example
///
/// ```
/// use vitrina::{Dataset, GalleryState};
///
/// let dataset = Dataset::from_csv_str(
///     "image_alt,article_title\nRed barn,Farm day\nBlue lake,Summer trip\n",
/// )
/// .unwrap();
///
/// let mut state = GalleryState::new();
/// state.install("demo", dataset);
/// state.set_query("lake");
///
/// let view = state.view_model();
/// assert_eq!(view.filtered_rows, 1);
/// assert_eq!(view.word_frequencies.get("Summer"), 1);
/// ```
pub struct GalleryState {
    dataset_id: Option<String>,
    rows: Vec<Row>,
    query: String,
    filtered: Vec<Row>,
    page_size: PageSize,
    page_index: usize,
    frequencies: WordFrequencies,
    zoom: Zoom,
    status: LoadStatus,
    generation: u64,
    search: SearchFilter,
    analyzer: TextAnalyzer,
    shuffler: Option<Shuffler>,
    word_click: Vec<WordClickHandler>,
}

impl Default for GalleryState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GalleryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GalleryState")
            .field("dataset_id", &self.dataset_id)
            .field("rows", &self.rows.len())
            .field("query", &self.query)
            .field("filtered", &self.filtered.len())
            .field("page_size", &self.page_size)
            .field("page_index", &self.page_index)
            .field("zoom", &self.zoom)
            .field("status", &self.status)
            .field("generation", &self.generation)
            .field("shuffle", &self.shuffler.is_some())
            .field("word_click_handlers", &self.word_click.len())
            .finish_non_exhaustive()
    }
}

impl GalleryState {
    /// Creates an empty state: no rows, page size 50, zoom 1.0, no shuffle.
    pub fn new() -> Self {
        Self {
            dataset_id: None,
            rows: Vec::new(),
            query: String::new(),
            filtered: Vec::new(),
            page_size: PageSize::default(),
            page_index: 0,
            frequencies: WordFrequencies::default(),
            zoom: Zoom::default(),
            status: LoadStatus::Idle,
            generation: 0,
            search: SearchFilter::default(),
            analyzer: TextAnalyzer::default(),
            shuffler: None,
            word_click: Vec::new(),
        }
    }

    /// Sets the initial page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Shuffles every installed dataset with `shuffler`.
    #[must_use]
    pub fn with_shuffler(mut self, shuffler: Shuffler) -> Self {
        self.shuffler = Some(shuffler);
        self
    }

    /// Replaces the search filter.
    #[must_use]
    pub fn with_search_filter(mut self, search: SearchFilter) -> Self {
        self.search = search;
        self
    }

    /// Replaces the text analyzer.
    #[must_use]
    pub fn with_analyzer(mut self, analyzer: TextAnalyzer) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Sets the zoom step.
    #[must_use]
    pub fn with_zoom_step(mut self, step: f64) -> Self {
        self.zoom = Zoom::new(step);
        self
    }

    // ---- loading ----------------------------------------------------------

    /// Replaces the rows with `dataset` and resets query and page.
    ///
    /// Rows are shuffled first when a shuffler is configured. The page size
    /// is kept. Any load still in flight is superseded.
    pub fn install(&mut self, dataset_id: &str, dataset: Dataset) {
        self.generation += 1;
        self.install_rows(dataset_id, dataset);
    }

    fn install_rows(&mut self, dataset_id: &str, dataset: Dataset) {
        let rows = dataset.into_rows();
        self.rows = match self.shuffler.as_mut() {
            Some(shuffler) => shuffler.apply(&rows),
            None => rows,
        };
        self.dataset_id = Some(dataset_id.to_string());
        self.query.clear();
        self.page_index = 0;
        self.status = LoadStatus::Ready {
            dataset_id: dataset_id.to_string(),
        };
        self.recompute();
        log::info!(
            "installed dataset '{dataset_id}' ({} rows)",
            self.rows.len()
        );
    }

    /// Marks a load of `dataset_id` as started and returns its ticket.
    ///
    /// Any ticket handed out earlier becomes stale.
    pub fn begin_load(&mut self, dataset_id: &str) -> LoadTicket {
        self.generation += 1;
        self.status = LoadStatus::Loading {
            dataset_id: dataset_id.to_string(),
        };
        LoadTicket {
            generation: self.generation,
            dataset_id: dataset_id.to_string(),
        }
    }

    /// Returns true if `ticket` belongs to the latest load.
    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Applies the outcome of the load behind `ticket`.
    ///
    /// Returns false, changing nothing, when a newer load has started since.
    /// On success the dataset is installed; on failure the status becomes
    /// [`LoadStatus::Failed`] and the current rows stay.
    pub fn complete_load(&mut self, ticket: LoadTicket, result: Result<Dataset>) -> bool {
        match result {
            Ok(dataset) => {
                if !self.is_current(&ticket) {
                    log::debug!(
                        "ignoring stale load of '{}' (generation {} < {})",
                        ticket.dataset_id,
                        ticket.generation,
                        self.generation
                    );
                    return false;
                }
                self.install_rows(&ticket.dataset_id, dataset);
                true
            }
            Err(err) => self.fail_load(&ticket, &err),
        }
    }

    /// Records a failed load. Returns false if `ticket` is stale.
    pub fn fail_load(&mut self, ticket: &LoadTicket, error: &Error) -> bool {
        if !self.is_current(ticket) {
            log::debug!(
                "ignoring stale failure of '{}': {error}",
                ticket.dataset_id
            );
            return false;
        }
        log::warn!("failed to load dataset '{}': {error}", ticket.dataset_id);
        self.status = LoadStatus::Failed {
            dataset_id: ticket.dataset_id.clone(),
            message: error.to_string(),
        };
        true
    }

    // ---- query and paging -------------------------------------------------

    /// Sets the search query, returning to the first page.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page_index = 0;
        self.recompute();
    }

    /// Sets the page size, returning to the first page.
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.page_index = 0;
    }

    /// Sets the page size from a raw number.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPageSize`] for values other than 10, 20, 50
    /// or 100; the state is left unchanged.
    pub fn set_page_size_value(&mut self, value: usize) -> Result<()> {
        let page_size = PageSize::try_from(value)?;
        self.set_page_size(page_size);
        Ok(())
    }

    /// Jumps to `page_index`. Out-of-range requests are ignored.
    ///
    /// Returns true if the page changed or was already current.
    pub fn go_to_page(&mut self, page_index: usize) -> bool {
        if page_index >= self.page_count() {
            log::debug!(
                "ignoring page {page_index}: only {} pages",
                self.page_count()
            );
            return false;
        }
        self.page_index = page_index;
        true
    }

    /// Moves to the next page if there is one.
    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.page_index.saturating_add(1))
    }

    /// Moves to the previous page if there is one.
    pub fn prev_page(&mut self) -> bool {
        match self.page_index.checked_sub(1) {
            Some(index) => self.go_to_page(index),
            None => false,
        }
    }

    // ---- zoom -------------------------------------------------------------

    /// Zooms the word cloud in by one step.
    pub fn zoom_in(&mut self) {
        self.zoom.zoom_in();
    }

    /// Zooms the word cloud out by one step.
    pub fn zoom_out(&mut self) {
        self.zoom.zoom_out();
    }

    /// Resets the zoom to 1.0.
    pub fn reset_zoom(&mut self) {
        self.zoom.reset();
    }

    /// Current zoom factor.
    pub fn zoom(&self) -> f64 {
        self.zoom.factor()
    }

    // ---- word clicks ------------------------------------------------------

    /// Registers a word-click observer.
    pub fn on_word_click<F>(&mut self, handler: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.word_click.push(Box::new(handler));
    }

    /// Notifies every observer that `token` was clicked.
    ///
    /// Nothing else happens; use [`GalleryState::search_clicked_word`] to
    /// also search for it.
    pub fn click_word(&self, token: &str) {
        for handler in &self.word_click {
            handler(token);
        }
    }

    /// Notifies observers, then makes `token` the search query.
    pub fn search_clicked_word(&mut self, token: &str) {
        self.click_word(token);
        self.set_query(token);
    }

    // ---- accessors --------------------------------------------------------

    /// Id of the installed dataset.
    pub fn dataset_id(&self) -> Option<&str> {
        self.dataset_id.as_deref()
    }

    /// Installed rows, in display order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Rows matching the current query.
    pub fn filtered_rows(&self) -> &[Row] {
        &self.filtered
    }

    /// Current query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Rows per page.
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Current page (zero-based).
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Number of pages for the filtered rows.
    pub fn page_count(&self) -> usize {
        page_count(self.filtered.len(), self.page_size.get())
    }

    /// The current page of filtered rows.
    pub fn page(&self) -> Page<'_, Row> {
        paginate(&self.filtered, self.page_size.get(), self.page_index)
    }

    /// Word frequencies of the filtered rows.
    pub fn word_frequencies(&self) -> &WordFrequencies {
        &self.frequencies
    }

    /// Load progress.
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Current load generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Builds a render-ready snapshot.
    pub fn view_model(&self) -> ViewModel {
        let page = self.page();
        ViewModel {
            rows: page.window.to_vec(),
            page_index: page.page_index,
            page_count: page.page_count,
            total_rows: self.rows.len(),
            filtered_rows: self.filtered.len(),
            word_frequencies: self.frequencies.clone(),
            zoom: self.zoom.factor(),
            status: self.status.clone(),
            query: self.query.clone(),
            page_size: self.page_size,
        }
    }

    fn recompute(&mut self) {
        self.filtered = self.search.apply(&self.rows, &self.query);
        self.frequencies = self.analyzer.analyze(&self.filtered);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::{analytics::StopwordSet, dataset::fields};

    fn dataset(count: usize) -> Dataset {
        let mut csv = String::from("id,image_alt,article_title,article_url\n");
        for i in 0..count {
            let animal = if i % 2 == 0 { "owl" } else { "fox" };
            csv.push_str(&format!(
                "{i},Photo {i} of a {animal},The {animal} story,https://news.example/{i}\n"
            ));
        }
        Dataset::from_csv_str(&csv)
            .ok()
            .unwrap_or_else(|| panic!("Should parse"))
    }

    fn loaded(count: usize) -> GalleryState {
        let mut state = GalleryState::new();
        state.install("demo", dataset(count));
        state
    }

    #[test]
    fn test_new_state() {
        let state = GalleryState::new();
        let view = state.view_model();
        assert!(view.rows.is_empty());
        assert_eq!(view.page_count, 1);
        assert_eq!(view.page_size, PageSize::Fifty);
        assert_eq!(view.status, LoadStatus::Idle);
        assert!(view.word_frequencies.is_empty());
    }

    #[test]
    fn test_install_resets_query_and_page() {
        let mut state = loaded(120);
        state.set_query("owl");
        assert!(state.go_to_page(1));
        state.set_page_size(PageSize::Ten);

        state.install("other", dataset(30));
        assert_eq!(state.query(), "");
        assert_eq!(state.page_index(), 0);
        assert_eq!(state.page_size(), PageSize::Ten, "FALSIFIED: page size must survive install");
        assert_eq!(state.filtered_rows().len(), 30);
        assert_eq!(state.dataset_id(), Some("other"));
    }

    #[test]
    fn test_query_filters_and_resets_page() {
        let mut state = loaded(120);
        assert!(state.go_to_page(2));
        state.set_query("FOX");
        assert_eq!(state.page_index(), 0);
        assert_eq!(state.filtered_rows().len(), 60);
        assert_eq!(state.page_count(), 2);
        assert_eq!(state.word_frequencies().get("fox"), 60);
        assert_eq!(state.word_frequencies().get("owl"), 0);
    }

    #[test]
    fn test_frequencies_use_stopwords() {
        let state = loaded(4);
        assert_eq!(state.word_frequencies().get("The"), 0);
        assert_eq!(state.word_frequencies().get("story"), 4);
    }

    #[test]
    fn test_page_size_change() {
        let mut state = loaded(25);
        state.set_page_size(PageSize::Ten);
        assert!(state.go_to_page(2));
        assert_eq!(state.page().window.len(), 5);

        state.set_page_size(PageSize::Twenty);
        assert_eq!(state.page_index(), 0);
        assert_eq!(state.page_count(), 2);
    }

    #[test]
    fn test_invalid_page_size_value() {
        let mut state = loaded(25);
        state.set_page_size(PageSize::Ten);
        assert!(state.go_to_page(1));

        let err = state.set_page_size_value(25);
        assert!(matches!(err, Err(Error::InvalidPageSize { value: 25 })));
        assert_eq!(state.page_size(), PageSize::Ten);
        assert_eq!(state.page_index(), 1, "FALSIFIED: rejected size must not reset page");

        assert!(state.set_page_size_value(100).is_ok());
        assert_eq!(state.page_size(), PageSize::Hundred);
    }

    #[test]
    fn test_go_to_page_bounds() {
        let mut state = loaded(25);
        state.set_page_size(PageSize::Ten);
        assert!(!state.go_to_page(3));
        assert_eq!(state.page_index(), 0);
        assert!(state.go_to_page(2));
        assert!(!state.next_page());
        assert!(state.prev_page());
        assert!(state.prev_page());
        assert!(!state.prev_page());
        assert_eq!(state.page_index(), 0);
    }

    #[test]
    fn test_empty_filter_has_one_page() {
        let mut state = loaded(10);
        state.set_query("zebra");
        assert_eq!(state.page_count(), 1);
        assert!(state.go_to_page(0));
        assert!(state.page().window.is_empty());
        assert!(state.word_frequencies().is_empty());
    }

    #[test]
    fn test_zoom_does_not_touch_analytics() {
        let mut state = loaded(10);
        let before = state.word_frequencies().clone();
        state.zoom_in();
        state.zoom_in();
        assert!((state.zoom() - 1.2).abs() < 1e-9);
        state.zoom_out();
        assert!((state.zoom() - 1.1).abs() < 1e-9);
        state.reset_zoom();
        assert!((state.zoom() - 1.0).abs() < 1e-9);
        assert_eq!(state.word_frequencies(), &before);
    }

    #[test]
    fn test_word_click_notifies_only() {
        let mut state = loaded(10);
        let clicked = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&clicked);
        state.on_word_click(move |word| {
            sink.lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push(word.to_string());
        });

        state.click_word("fox");
        assert_eq!(state.query(), "", "FALSIFIED: click must not change the query");
        assert_eq!(
            *clicked.lock().unwrap_or_else(std::sync::PoisonError::into_inner),
            vec!["fox".to_string()]
        );

        state.search_clicked_word("owl");
        assert_eq!(state.query(), "owl");
        assert_eq!(state.filtered_rows().len(), 5);
        assert_eq!(
            clicked.lock().unwrap_or_else(std::sync::PoisonError::into_inner).len(),
            2
        );
    }

    #[test]
    fn test_stale_ticket_ignored() {
        let mut state = GalleryState::new();
        let first = state.begin_load("a");
        let second = state.begin_load("b");

        assert!(state.complete_load(second, Ok(dataset(3))));
        assert!(!state.complete_load(first, Ok(dataset(7))));
        assert_eq!(state.rows().len(), 3);
        assert_eq!(
            state.status(),
            &LoadStatus::Ready {
                dataset_id: "b".to_string()
            }
        );
    }

    #[test]
    fn test_install_supersedes_pending_load() {
        let mut state = GalleryState::new();
        let ticket = state.begin_load("slow");
        state.install("direct", dataset(2));
        assert!(!state.complete_load(ticket, Ok(dataset(9))));
        assert_eq!(state.dataset_id(), Some("direct"));
    }

    #[test]
    fn test_failed_load_keeps_rows() {
        let mut state = loaded(6);
        let ticket = state.begin_load("broken");
        assert!(matches!(state.status(), LoadStatus::Loading { .. }));

        assert!(state.complete_load(ticket, Err(Error::fetch("x.csv", "status 500"))));
        assert_eq!(state.rows().len(), 6);
        assert_eq!(state.dataset_id(), Some("demo"));
        match state.status() {
            LoadStatus::Failed {
                dataset_id,
                message,
            } => {
                assert_eq!(dataset_id, "broken");
                assert!(message.contains("500"));
            }
            other => panic!("Expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn test_stale_failure_ignored() {
        let mut state = GalleryState::new();
        let first = state.begin_load("a");
        let second = state.begin_load("b");
        assert!(state.complete_load(second, Ok(dataset(1))));
        assert!(!state.fail_load(&first, &Error::parse("empty")));
        assert!(matches!(state.status(), LoadStatus::Ready { .. }));
    }

    #[test]
    fn test_shuffled_install_is_permutation() {
        let mut state = GalleryState::new().with_shuffler(Shuffler::with_seed(3));
        state.install("demo", dataset(40));
        let mut ids: Vec<String> = state
            .rows()
            .iter()
            .map(|row| row.text(fields::ID).into_owned())
            .collect();
        let original: Vec<String> = (0..40).map(|i| i.to_string()).collect();
        assert_ne!(ids, original);
        ids.sort_by_key(|id| id.parse::<usize>().unwrap_or(usize::MAX));
        assert_eq!(ids, original);
    }

    #[test]
    fn test_custom_analyzer() {
        let mut state = GalleryState::new()
            .with_analyzer(TextAnalyzer::new(fields::IMAGE_ALT, StopwordSet::english()));
        state.install("demo", dataset(2));
        assert_eq!(state.word_frequencies().get("Photo"), 2);
        assert_eq!(state.word_frequencies().get("story"), 0);
    }

    #[test]
    fn test_view_model_serializes() {
        let mut state = loaded(3);
        state.set_page_size(PageSize::Ten);
        let json = serde_json::to_value(state.view_model())
            .ok()
            .unwrap_or_else(|| panic!("Should serialize"));
        assert_eq!(json["page_size"], 10);
        assert_eq!(json["total_rows"], 3);
        assert_eq!(json["status"]["state"], "ready");
        assert_eq!(json["rows"][0]["image_alt"], "Photo 0 of a owl");
        assert_eq!(json["rows"][0]["id"], 0.0);
    }
}
