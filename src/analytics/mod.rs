//! Text analytics: word frequencies over one text field of a row set.
//!
//! The pipeline is deliberately simple:
//!
//! 1. take the chosen field of every row (absent and null values add nothing)
//! 2. split on whitespace; punctuation stays attached and case is kept, so
//!    `fox` and `fox,` count as different tokens
//! 3. drop stopwords
//! 4. count what is left
//!
//! Frequencies are always rebuilt from scratch for the current rows.

pub mod cloud;
mod stopwords;

use std::collections::HashMap;

use serde::Serialize;
pub use stopwords::{StopwordSet, ENGLISH};

use crate::dataset::{fields, Row};

/// Token counts produced by [`analyze`].
///
/// Iteration order is unspecified; use [`WordFrequencies::ranked`] for a
/// stable ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WordFrequencies {
    counts: HashMap<String, usize>,
}

impl WordFrequencies {
    /// Returns the count for `token`, or 0 if it never occurred.
    pub fn get(&self, token: &str) -> usize {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Returns the number of distinct tokens.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if no tokens were counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Returns the sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Iterates over `(token, count)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(token, count)| (token.as_str(), *count))
    }

    /// Returns all entries sorted by count (descending), then token.
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self.iter().collect();
        entries.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// Returns the `n` highest-ranked entries.
    pub fn top(&self, n: usize) -> Vec<(&str, usize)> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }

    /// Consumes the frequencies, returning the underlying map.
    pub fn into_map(self) -> HashMap<String, usize> {
        self.counts
    }
}

impl FromIterator<(String, usize)> for WordFrequencies {
    fn from_iter<I: IntoIterator<Item = (String, usize)>>(iter: I) -> Self {
        let mut counts = HashMap::new();
        for (token, count) in iter {
            if count > 0 {
                *counts.entry(token).or_insert(0) += count;
            }
        }
        Self { counts }
    }
}

/// Counts the non-stopword tokens of `text_field` across `rows`.
///
/// # Example
///
/// ```
/// use vitrina::{analytics::{analyze, StopwordSet}, Row};
///
/// let rows = vec![
///     Row::from_pairs([("article_title", "the quick fox")]),
///     Row::from_pairs([("article_title", "the lazy fox")]),
/// ];
/// let freq = analyze(&rows, "article_title", &StopwordSet::from_words(["the"]));
/// assert_eq!(freq.get("fox"), 2);
/// assert_eq!(freq.get("the"), 0);
/// ```
pub fn analyze(rows: &[Row], text_field: &str, stopwords: &StopwordSet) -> WordFrequencies {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for row in rows {
        let text = row.text(text_field);
        for token in text.split_whitespace() {
            if stopwords.contains(token) {
                continue;
            }
            *counts.entry(token.to_string()).or_insert(0) += 1;
        }
    }
    WordFrequencies { counts }
}

/// Field and stopword configuration for repeated analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextAnalyzer {
    text_field: String,
    stopwords: StopwordSet,
}

impl Default for TextAnalyzer {
    /// Article titles with the English stopword list.
    fn default() -> Self {
        Self::new(fields::ARTICLE_TITLE, StopwordSet::english())
    }
}

impl TextAnalyzer {
    /// Creates an analyzer for `text_field` with the given stopwords.
    pub fn new(text_field: impl Into<String>, stopwords: StopwordSet) -> Self {
        Self {
            text_field: text_field.into(),
            stopwords,
        }
    }

    /// Returns the analyzed field name.
    pub fn text_field(&self) -> &str {
        &self.text_field
    }

    /// Returns the stopword set.
    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    /// Runs [`analyze`] with this configuration.
    pub fn analyze(&self, rows: &[Row]) -> WordFrequencies {
        analyze(rows, &self.text_field, &self.stopwords)
    }
}
