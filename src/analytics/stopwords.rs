//! Stopword sets for text analytics.

use std::collections::HashSet;

/// Common English words excluded from word clouds: articles, pronouns,
/// prepositions, auxiliaries and similar filler.
pub const ENGLISH: &[&str] = &[
    "a", "about", "after", "all", "also", "am", "an", "and", "another", "any", "are", "as", "at",
    "be", "because", "been", "before", "being", "between", "both", "but", "by", "came", "can",
    "come", "could", "did", "do", "each", "for", "from", "get", "got", "had", "has", "have", "he",
    "her", "here", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its",
    "like", "make", "many", "me", "might", "more", "most", "much", "must", "my", "never", "now",
    "of", "on", "only", "or", "other", "our", "out", "over", "said", "same", "see", "should",
    "since", "some", "still", "such", "take", "than", "that", "the", "their", "them", "then",
    "there", "these", "they", "this", "those", "through", "to", "too", "under", "up", "very",
    "was", "way", "we", "well", "were", "what", "where", "which", "while", "who", "with", "would",
    "you", "your",
];

/// A set of words to drop before counting.
///
/// Lookups ignore case: `"The"` is a stopword when `"the"` is in the set.
/// Counted tokens themselves keep their original case.
///
/// # Example
///
/// ```
/// use vitrina::analytics::StopwordSet;
///
/// let stopwords = StopwordSet::english();
/// assert!(stopwords.contains("The"));
/// assert!(!stopwords.contains("library"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// The built-in English list.
    pub fn english() -> Self {
        Self::from_words(ENGLISH.iter().copied())
    }

    /// An empty set; nothing is removed.
    pub fn none() -> Self {
        Self::default()
    }

    /// Builds a set from arbitrary words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Returns a copy of this set extended with `words`.
    #[must_use]
    pub fn with_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
        self
    }

    /// Returns true if `token` is a stopword, ignoring case.
    pub fn contains(&self, token: &str) -> bool {
        if self.words.contains(token) {
            return true;
        }
        // Only allocate when the token has uppercase characters.
        token.chars().any(char::is_uppercase) && self.words.contains(&token.to_lowercase())
    }

    /// Returns the number of words in the set.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
