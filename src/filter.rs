//! Search filter: case-insensitive substring match over a fixed set of
//! fields.

use crate::dataset::{fields, Row};

/// Fields searched by default: alt text, article title and article URL.
pub const SEARCHABLE_FIELDS: [&str; 3] =
    [fields::IMAGE_ALT, fields::ARTICLE_TITLE, fields::ARTICLE_URL];

/// Returns the rows whose searchable fields contain `query`.
///
/// Uses [`SEARCHABLE_FIELDS`]. See [`SearchFilter::apply`] for the matching
/// rules.
pub fn filter(rows: &[Row], query: &str) -> Vec<Row> {
    SearchFilter::default().apply(rows, query)
}

/// A substring search over a configurable list of fields.
///
/// # Example
///
/// ```
/// use vitrina::{filter::SearchFilter, Row};
///
/// let rows = vec![
///     Row::from_pairs([("image_alt", "Red barn")]),
///     Row::from_pairs([("image_alt", "Blue lake")]),
/// ];
/// let hits = SearchFilter::default().apply(&rows, "BARN");
/// assert_eq!(hits.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    fields: Vec<String>,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self::new(SEARCHABLE_FIELDS)
    }
}

impl SearchFilter {
    /// Creates a filter that searches the given fields.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the searched field names.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Returns true if any searched field of `row` contains the already
    /// lower-cased `needle`.
    fn matches(&self, row: &Row, needle: &str) -> bool {
        self.fields
            .iter()
            .any(|field| row.text(field).to_lowercase().contains(needle))
    }

    /// Returns the rows matching `query`, in input order.
    ///
    /// - the query is lower-cased; matching is a literal substring test, so
    ///   a multi-word query matches as a phrase
    /// - an empty or all-whitespace query returns every row
    /// - absent and null fields read as empty text
    pub fn apply(&self, rows: &[Row], query: &str) -> Vec<Row> {
        if query.trim().is_empty() {
            return rows.to_vec();
        }
        let needle = query.to_lowercase();
        rows.iter()
            .filter(|row| self.matches(row, &needle))
            .cloned()
            .collect()
    }
}
