//! Paginator: fixed-size windows over a row set.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Allowed page sizes.
///
/// The set is closed; anything else is a configuration error raised by
/// [`PageSize::try_from`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum PageSize {
    /// 10 rows per page.
    Ten,
    /// 20 rows per page.
    Twenty,
    /// 50 rows per page.
    #[default]
    Fifty,
    /// 100 rows per page.
    Hundred,
}

impl PageSize {
    /// Every allowed page size, smallest first.
    pub const ALL: [PageSize; 4] = [Self::Ten, Self::Twenty, Self::Fifty, Self::Hundred];

    /// Returns the number of rows per page.
    #[inline]
    pub const fn get(self) -> usize {
        match self {
            Self::Ten => 10,
            Self::Twenty => 20,
            Self::Fifty => 50,
            Self::Hundred => 100,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|size| size.get() == value)
            .ok_or(Error::InvalidPageSize { value })
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// One page of a row set.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    /// The rows shown on this page.
    pub window: &'a [T],
    /// The requested page index (zero-based).
    pub page_index: usize,
    /// Total number of pages, never less than one.
    pub page_count: usize,
}

/// Returns the number of pages for `len` rows: `max(1, ceil(len / page_size))`.
///
/// A zero page size is treated as one.
#[inline]
pub fn page_count(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Returns the window for `page_index` together with the page count.
///
/// The window is `rows[page_index * page_size .. + page_size]` clamped to the
/// slice. An out-of-range index yields an empty window rather than an error.
///
/// # Example
///
/// ```
/// use vitrina::paginate::paginate;
///
/// let rows: Vec<u32> = (0..25).collect();
/// let page = paginate(&rows, 10, 2);
/// assert_eq!(page.page_count, 3);
/// assert_eq!(page.window, &[20, 21, 22, 23, 24]);
/// ```
pub fn paginate<T>(rows: &[T], page_size: usize, page_index: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let start = page_index.saturating_mul(page_size).min(rows.len());
    let end = start.saturating_add(page_size).min(rows.len());
    Page {
        window: &rows[start..end],
        page_index,
        page_count: page_count(rows.len(), page_size),
    }
}
