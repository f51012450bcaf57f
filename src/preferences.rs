//! Persisted display preferences.
//!
//! The only preference is the page size, stored under [`PAGE_SIZE_KEY`].
//! Stores hold plain strings; interpretation and fallback live in
//! [`load_page_size`].

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use crate::{
    error::{Error, Result},
    paginate::PageSize,
};

/// Key of the stored page size.
pub const PAGE_SIZE_KEY: &str = "pageSize";

/// A string key-value store for preferences.
pub trait PreferenceStore: Send + Sync {
    /// Returns the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<P: PreferenceStore + ?Sized> PreferenceStore for Box<P> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Preferences kept in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPreferences {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences stored as a JSON object in a file.
///
/// The file is read once on open. Every [`set`](PreferenceStore::set)
/// rewrites it through a temporary sibling file and a rename, so readers
/// never see a partial write.
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FilePreferences {
    /// Opens the store at `path`.
    ///
    /// A missing, empty or undecodable file starts empty. Numbers and
    /// booleans are kept as their JSON text; other non-string entries are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = match fs::read(&path) {
            Ok(bytes) => decode_values(&bytes, &path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(Error::io(e, &path)),
        };
        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> Result<()> {
        let json = serde_json::to_string_pretty(values)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json).map_err(|e| Error::io(e, &tmp))?;
        fs::rename(&tmp, &self.path).map_err(|e| Error::io(e, &self.path))
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        let mut updated = values.clone();
        updated.insert(key.to_string(), value.to_string());
        self.persist(&updated)?;
        *values = updated;
        Ok(())
    }
}

fn decode_values(bytes: &[u8], path: &Path) -> BTreeMap<String, String> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return BTreeMap::new();
    }
    let object = match serde_json::from_slice::<serde_json::Value>(bytes) {
        Ok(serde_json::Value::Object(object)) => object,
        Ok(_) => {
            log::warn!("ignoring {}: not a JSON object", path.display());
            return BTreeMap::new();
        }
        Err(e) => {
            log::warn!("ignoring unreadable {}: {e}", path.display());
            return BTreeMap::new();
        }
    };
    object
        .into_iter()
        .filter_map(|(key, value)| match value {
            serde_json::Value::String(s) => Some((key, s)),
            serde_json::Value::Number(n) => Some((key, n.to_string())),
            serde_json::Value::Bool(b) => Some((key, b.to_string())),
            other => {
                log::warn!("ignoring stored '{key}': {other}");
                None
            }
        })
        .collect()
}

/// Reads the stored page size.
///
/// Falls back to the default (50) when nothing is stored, the value is not
/// a number, or the number is not an allowed page size.
pub fn load_page_size<P: PreferenceStore + ?Sized>(store: &P) -> PageSize {
    let Some(raw) = store.get(PAGE_SIZE_KEY) else {
        return PageSize::default();
    };
    match raw.trim().parse::<usize>().map(PageSize::try_from) {
        Ok(Ok(size)) => size,
        _ => {
            log::warn!(
                "ignoring stored {PAGE_SIZE_KEY} '{raw}', using {}",
                PageSize::default()
            );
            PageSize::default()
        }
    }
}

/// Stores `page_size`.
///
/// # Errors
///
/// Returns an error if the store cannot be written.
pub fn store_page_size<P>(store: &P, page_size: PageSize) -> Result<()>
where
    P: PreferenceStore + ?Sized,
{
    store.set(PAGE_SIZE_KEY, &page_size.to_string())
}
