//! Word-cloud sizing.
//!
//! Purely presentational: turns [`WordFrequencies`] into entries with a font
//! size on a square-root scale. Layout and rendering belong to the front end.

use serde::{Deserialize, Serialize};

use super::WordFrequencies;

/// Sizing options for [`cloud_words`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudOptions {
    /// Font size of the least frequent word.
    pub min_font_size: f64,
    /// Font size of the most frequent word.
    pub max_font_size: f64,
    /// Keep only this many top-ranked words.
    pub max_words: Option<usize>,
}

impl Default for CloudOptions {
    fn default() -> Self {
        Self {
            min_font_size: 15.0,
            max_font_size: 60.0,
            max_words: None,
        }
    }
}

impl CloudOptions {
    /// Creates options with the default 15..60 font range.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size range.
    #[must_use]
    pub fn with_font_range(mut self, min: f64, max: f64) -> Self {
        self.min_font_size = min;
        self.max_font_size = max;
        self
    }

    /// Limits the number of words.
    #[must_use]
    pub fn with_max_words(mut self, max_words: usize) -> Self {
        self.max_words = Some(max_words);
        self
    }
}

/// One sized entry of the word cloud.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CloudWord {
    /// The token.
    pub text: String,
    /// Its count.
    pub value: usize,
    /// Font size after scaling and zoom.
    pub font_size: f64,
}

/// Sizes the words of `frequencies` for display.
///
/// Entries come out in [`WordFrequencies::ranked`] order. The font size maps
/// `sqrt(count)` linearly from the smallest to the largest count onto
/// `[min_font_size, max_font_size]`, then multiplies by `zoom`. When every
/// word has the same count they all sit in the middle of the range.
///
/// # Example
///
/// ```
/// use vitrina::analytics::cloud::{cloud_words, CloudOptions};
/// use vitrina::analytics::WordFrequencies;
///
/// let freq: WordFrequencies = vec![("fox".to_string(), 4), ("owl".to_string(), 1)]
///     .into_iter()
///     .collect();
/// let words = cloud_words(&freq, &CloudOptions::default(), 1.0);
/// assert_eq!(words[0].text, "fox");
/// assert_eq!(words[0].font_size, 60.0);
/// assert_eq!(words[1].font_size, 15.0);
/// ```
pub fn cloud_words(
    frequencies: &WordFrequencies,
    options: &CloudOptions,
    zoom: f64,
) -> Vec<CloudWord> {
    let mut ranked = frequencies.ranked();
    if let Some(max_words) = options.max_words {
        ranked.truncate(max_words);
    }

    let (lo, hi) = ranked.iter().fold((usize::MAX, 0), |(lo, hi), (_, count)| {
        (lo.min(*count), hi.max(*count))
    });
    let lo = (lo as f64).sqrt();
    let span = (hi as f64).sqrt() - lo;
    let range = options.max_font_size - options.min_font_size;

    ranked
        .into_iter()
        .map(|(text, value)| {
            let t = if span > 0.0 {
                ((value as f64).sqrt() - lo) / span
            } else {
                0.5
            };
            CloudWord {
                text: text.to_string(),
                value,
                font_size: (options.min_font_size + t * range) * zoom,
            }
        })
        .collect()
}
