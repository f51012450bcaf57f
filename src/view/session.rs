//! A gallery session: loader, state and preferences wired together.

use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{GalleryState, ViewModel};
use crate::{
    backend::DatasetSource,
    error::Result,
    loader::DatasetLoader,
    paginate::PageSize,
    preferences::{load_page_size, store_page_size, PreferenceStore},
};

/// Drives a [`GalleryState`] from a [`DatasetLoader`].
///
/// The state sits behind a mutex that is never held across the fetch, so
/// several loads can be in flight at once. The one started last wins
/// regardless of completion order.
///
/// # Example
///
/// ```
/// use vitrina::{
///     backend::MemorySource, preferences::MemoryPreferences, DatasetLoader, DatasetRegistry,
///     GalleryState, Session,
/// };
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
/// let source = MemorySource::new();
/// source.put("ncsu_processed_data.csv", "article_title\nWolfpack wins\n");
///
/// let loader = DatasetLoader::new(DatasetRegistry::default(), source);
/// let session = Session::new(loader, GalleryState::new(), MemoryPreferences::new());
/// session.load("ncsu").await.unwrap();
/// assert_eq!(session.view_model().total_rows, 1);
/// # });
/// ```
#[derive(Debug)]
pub struct Session<S, P> {
    loader: DatasetLoader<S>,
    state: Mutex<GalleryState>,
    preferences: P,
}

impl<S: DatasetSource, P: PreferenceStore> Session<S, P> {
    /// Creates a session, applying the stored page size to `state`.
    pub fn new(loader: DatasetLoader<S>, mut state: GalleryState, preferences: P) -> Self {
        state.set_page_size(load_page_size(&preferences));
        Self {
            loader,
            state: Mutex::new(state),
            preferences,
        }
    }

    /// Locks the gallery state.
    ///
    /// Do not hold the guard across an `.await`.
    pub fn state(&self) -> MutexGuard<'_, GalleryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the loader.
    pub fn loader(&self) -> &DatasetLoader<S> {
        &self.loader
    }

    /// Returns the preference store.
    pub fn preferences(&self) -> &P {
        &self.preferences
    }

    /// Loads `dataset_id` and installs it unless a newer load started
    /// meanwhile.
    ///
    /// Returns `Ok(true)` if the dataset was installed and `Ok(false)` if the
    /// result was stale and discarded.
    ///
    /// # Errors
    ///
    /// Returns the load error. The state keeps its rows and, if this load is
    /// still the latest, reports [`LoadStatus::Failed`](super::LoadStatus).
    pub async fn load(&self, dataset_id: &str) -> Result<bool> {
        let ticket = self.state().begin_load(dataset_id);
        match self.loader.load(dataset_id).await {
            Ok(dataset) => Ok(self.state().complete_load(ticket, Ok(dataset))),
            Err(err) => {
                self.state().fail_load(&ticket, &err);
                Err(err)
            }
        }
    }

    /// Validates, applies and persists a page size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPageSize`](crate::Error::InvalidPageSize) for
    /// disallowed values, or a store error if persisting fails. A store
    /// failure leaves the new size applied.
    pub fn set_page_size(&self, value: usize) -> Result<()> {
        let page_size = PageSize::try_from(value)?;
        self.state().set_page_size(page_size);
        store_page_size(&self.preferences, page_size)
    }

    /// Sets the search query.
    pub fn set_query(&self, query: &str) {
        self.state().set_query(query);
    }

    /// Jumps to a page; see [`GalleryState::go_to_page`].
    pub fn go_to_page(&self, page_index: usize) -> bool {
        self.state().go_to_page(page_index)
    }

    /// Snapshot of the current view.
    pub fn view_model(&self) -> ViewModel {
        self.state().view_model()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        backend::MemorySource, error::Error, preferences::MemoryPreferences,
        preferences::PAGE_SIZE_KEY, registry::DatasetRegistry, view::LoadStatus,
    };

    fn session_with(source: MemorySource) -> Session<MemorySource, MemoryPreferences> {
        let loader = DatasetLoader::new(DatasetRegistry::default(), source);
        Session::new(loader, GalleryState::new(), MemoryPreferences::new())
    }

    fn csv_rows(count: usize) -> String {
        let mut csv = String::from("article_title\n");
        for i in 0..count {
            csv.push_str(&format!("Story {i}\n"));
        }
        csv
    }

    #[test]
    fn test_new_applies_stored_page_size() {
        let prefs = MemoryPreferences::new();
        prefs
            .set(PAGE_SIZE_KEY, "20")
            .ok()
            .unwrap_or_else(|| panic!("Should set"));
        let loader = DatasetLoader::new(DatasetRegistry::default(), MemorySource::new());
        let session = Session::new(loader, GalleryState::new(), prefs);
        assert_eq!(session.state().page_size(), PageSize::Twenty);
    }

    #[test]
    fn test_set_page_size_persists() {
        let session = session_with(MemorySource::new());
        session
            .set_page_size(10)
            .ok()
            .unwrap_or_else(|| panic!("Should accept 10"));
        assert_eq!(session.preferences().get(PAGE_SIZE_KEY).as_deref(), Some("10"));

        assert!(matches!(
            session.set_page_size(30),
            Err(Error::InvalidPageSize { value: 30 })
        ));
        assert_eq!(session.preferences().get(PAGE_SIZE_KEY).as_deref(), Some("10"));
        assert_eq!(session.state().page_size(), PageSize::Ten);
    }

    #[tokio::test]
    async fn test_load_installs() {
        let source = MemorySource::new();
        source.put("ncsu_processed_data.csv", csv_rows(12));
        let session = session_with(source);

        let applied = session
            .load("ncsu")
            .await
            .ok()
            .unwrap_or_else(|| panic!("Should load"));
        assert!(applied);

        session.set_query("Story 1");
        let view = session.view_model();
        assert_eq!(view.total_rows, 12);
        assert_eq!(view.filtered_rows, 3);
        assert!(session.go_to_page(0));
        assert!(!session.go_to_page(1));
    }

    #[tokio::test]
    async fn test_failed_load_reports_and_keeps_rows() {
        let source = MemorySource::new();
        source.put("ncsu_processed_data.csv", csv_rows(4));
        let session = session_with(source);
        let _ = session.load("ncsu").await;

        let err = session.load("stanford").await;
        assert!(matches!(err, Err(Error::Fetch { .. })));
        let state = session.state();
        assert_eq!(state.rows().len(), 4);
        assert!(matches!(state.status(), LoadStatus::Failed { .. }));
    }

    #[tokio::test]
    async fn test_unknown_dataset_fails() {
        let session = session_with(MemorySource::new());
        let err = session.load("mit").await;
        assert!(matches!(err, Err(Error::UnknownDataset { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_started_load_wins() {
        let source = MemorySource::new();
        source.put("ncsu_processed_data.csv", csv_rows(5));
        source.put("stanford_processed_data.csv", csv_rows(8));
        source.set_latency("ncsu_processed_data.csv", Duration::from_millis(500));
        source.set_latency("stanford_processed_data.csv", Duration::from_millis(10));
        let session = session_with(source);

        // ncsu starts first but finishes last.
        let (slow, fast) = tokio::join!(session.load("ncsu"), session.load("stanford"));

        assert_eq!(slow.ok(), Some(false));
        assert_eq!(fast.ok(), Some(true));
        let view = session.view_model();
        assert_eq!(view.total_rows, 8);
        assert_eq!(
            view.status,
            LoadStatus::Ready {
                dataset_id: "stanford".to_string()
            }
        );
    }
}
