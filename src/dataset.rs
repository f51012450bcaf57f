//! Dataset types for vitrina.
//!
//! A [`Dataset`] is an ordered collection of [`Row`]s sharing one header.
//! Datasets are built in bulk from delimited text and never mutated
//! afterwards; a reload replaces the whole value.

use std::{borrow::Cow, sync::Arc};

use serde::{ser::SerializeMap, Serialize, Serializer};

use crate::{
    error::{Error, Result},
    value::{try_parse_number, Value},
};

/// Field names used by the gallery datasets.
pub mod fields {
    /// Row identifier assigned by the crawler.
    pub const ID: &str = "id";
    /// Common Crawl URL key of the source page.
    pub const URL_KEY: &str = "urlkey";
    /// Title of the article the image was found in.
    pub const ARTICLE_TITLE: &str = "article_title";
    /// Image location.
    pub const IMAGE_URL: &str = "image_url";
    /// Image alt text.
    pub const IMAGE_ALT: &str = "image_alt";
    /// Article location.
    pub const ARTICLE_URL: &str = "article_url";
    /// Share of grayscale pixels in the image (0.0 to 1.0).
    pub const BW_RATIO: &str = "bw_ratio";
}

/// One record of a dataset.
///
/// Cloning a row is two reference-count bumps; the header and the values
/// are shared with every other clone.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    header: Arc<[String]>,
    values: Arc<[Value]>,
}

impl Row {
    /// Creates a row for `header`.
    ///
    /// Missing trailing values are filled with [`Value::Null`] and extra
    /// values are discarded, so the row always carries exactly the header's
    /// fields.
    pub fn new(header: Arc<[String]>, mut values: Vec<Value>) -> Self {
        values.resize(header.len(), Value::Null);
        Self {
            header,
            values: values.into(),
        }
    }

    /// Creates a row with its own header from `(field, value)` pairs.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let (header, values): (Vec<String>, Vec<Value>) = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .unzip();
        Self::new(header.into(), values)
    }

    /// Returns the value of `field`, or `None` if the header lacks it.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.header
            .iter()
            .position(|name| name == field)
            .and_then(|idx| self.values.get(idx))
    }

    /// Returns `field` as display text. Absent and null fields are empty.
    pub fn text(&self, field: &str) -> Cow<'_, str> {
        self.get(field).map_or(Cow::Borrowed(""), Value::as_text)
    }

    /// Returns the field names in header order.
    #[inline]
    pub fn fields(&self) -> &[String] {
        &self.header
    }

    /// Returns the values in header order.
    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Iterates over `(field, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.header
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.header.len()))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

/// Options for delimited-text parsing.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter (default is comma).
    pub delimiter: u8,
    /// Quote character (default is `"`).
    pub quote: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
        }
    }
}

impl CsvOptions {
    /// Creates new CSV options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the delimiter character.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the quote character.
    #[must_use]
    pub fn with_quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }
}

/// An in-memory dataset: a header plus rows in source order.
///
/// # Example
///
/// ```
/// use vitrina::Dataset;
///
/// let csv = "image_alt,article_title\n\"a cat, sleeping\",Cats\n";
/// let dataset = Dataset::from_csv_str(csv).unwrap();
/// assert_eq!(dataset.len(), 1);
/// assert_eq!(dataset.rows()[0].text("image_alt"), "a cat, sleeping");
/// ```
#[derive(Debug, Clone)]
pub struct Dataset {
    header: Arc<[String]>,
    rows: Vec<Row>,
    dropped_rows: usize,
}

impl Dataset {
    /// Creates a dataset from a header and rows.
    ///
    /// Rows built for a different header are re-keyed onto this one by
    /// field name; fields the row lacks become [`Value::Null`].
    pub fn new(header: Vec<String>, rows: Vec<Row>) -> Self {
        let header: Arc<[String]> = header.into();
        let rows = rows
            .into_iter()
            .map(|row| {
                if row.header == header {
                    row
                } else {
                    let values = header
                        .iter()
                        .map(|field| row.get(field).cloned().unwrap_or(Value::Null))
                        .collect();
                    Row::new(Arc::clone(&header), values)
                }
            })
            .collect();
        Self {
            header,
            rows,
            dropped_rows: 0,
        }
    }

    /// Parses comma-separated text whose first line is the header.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the header line is missing or empty.
    pub fn from_csv_str(data: &str) -> Result<Self> {
        Self::from_csv_bytes(data.as_bytes(), &CsvOptions::default())
    }

    /// Parses delimited text whose first line is the header.
    ///
    /// Quoted fields may contain the delimiter and newlines. Blank lines are
    /// skipped. Records whose field count differs from the header, or that
    /// are not valid UTF-8, are dropped and counted in
    /// [`Dataset::dropped_rows`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the header line is missing or empty. Header
    /// bytes that are not UTF-8 are replaced, not rejected.
    pub fn from_csv_bytes(data: &[u8], options: &CsvOptions) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(options.delimiter)
            .quote(options.quote)
            .from_reader(data);
        let mut records = reader.byte_records();

        let header_record = match records.next() {
            Some(Ok(record)) => record,
            Some(Err(e)) => return Err(Error::parse(format!("unreadable header line: {e}"))),
            None => return Err(Error::parse("missing header line")),
        };

        let header: Vec<String> = header_record
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let name = String::from_utf8_lossy(name);
                if i == 0 {
                    name.trim_start_matches('\u{feff}').to_string()
                } else {
                    name.into_owned()
                }
            })
            .collect();
        if header.iter().all(|name| name.trim().is_empty()) {
            return Err(Error::parse("empty header line"));
        }
        let header: Arc<[String]> = header.into();

        let mut rows = Vec::new();
        let mut dropped_rows = 0;
        for record in records {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    log::debug!("dropping unreadable record: {e}");
                    dropped_rows += 1;
                    continue;
                }
            };
            // blank line
            if record.len() <= 1 && record.get(0).map_or(true, <[u8]>::is_empty) {
                continue;
            }
            if record.len() != header.len() {
                log::debug!(
                    "dropping record with {} fields (header has {})",
                    record.len(),
                    header.len()
                );
                dropped_rows += 1;
                continue;
            }
            let record = match csv::StringRecord::from_byte_record(record) {
                Ok(record) => record,
                Err(e) => {
                    log::debug!("dropping record that is not UTF-8: {e}");
                    dropped_rows += 1;
                    continue;
                }
            };
            let values = record.iter().map(try_parse_number).collect();
            rows.push(Row::new(Arc::clone(&header), values));
        }

        if dropped_rows > 0 {
            log::debug!("parsed {} rows, dropped {dropped_rows}", rows.len());
        }

        Ok(Self {
            header,
            rows,
            dropped_rows,
        })
    }

    /// Returns the field names.
    #[inline]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Returns the rows in source order.
    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Consumes the dataset, returning its rows.
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Returns the number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the dataset has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns how many malformed records were dropped while parsing.
    #[inline]
    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    /// Returns true if the header contains `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.header.iter().any(|name| name == field)
    }
}
