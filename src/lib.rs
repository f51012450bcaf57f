//! vitrina - Data pipeline for searchable image galleries
//!
//! Loads a pre-generated table of image and article metadata, then serves it
//! to a gallery front end as a searchable, paginated, optionally shuffled
//! row set together with a word-frequency cloud of its titles.
//!
//! # Pipeline
//!
//! ```text
//! DatasetLoader ─▶ Shuffler ─▶ rows ─▶ SearchFilter ─▶ filtered ─┬─▶ paginate
//!                                                                 └─▶ analyze
//! ```
//!
//! Each stage returns fresh data; nothing is mutated in place. The
//! [`GalleryState`] coordinator owns the interaction state (query, page,
//! zoom) and recomputes derived data whenever an input changes.
//!
//! # Quick Start
//!
//! ```
//! use vitrina::{Dataset, GalleryState, PageSize};
//!
//! let csv = "image_alt,article_title,article_url\n\
//!            Red barn,Farm day recap,https://news.example/1\n\
//!            Blue lake,Summer at the lake,https://news.example/2\n";
//! let dataset = Dataset::from_csv_str(csv).unwrap();
//!
//! let mut state = GalleryState::new().with_page_size(PageSize::Ten);
//! state.install("demo", dataset);
//! state.set_query("lake");
//!
//! let view = state.view_model();
//! assert_eq!(view.rows.len(), 1);
//! assert_eq!(view.word_frequencies.get("Summer"), 1);
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
// Allow common test patterns
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines
    )
)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::cast_precision_loss)]

pub mod analytics;
pub mod backend;
/// CLI module for command-line interface
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod loader;
pub mod paginate;
pub mod preferences;
pub mod registry;
pub mod shuffle;
pub mod value;
pub mod view;

// Re-exports for convenience
pub use analytics::{analyze, StopwordSet, TextAnalyzer, WordFrequencies};
pub use backend::{create_source, AnySource, DatasetSource, SourceConfig};
pub use config::GalleryConfig;
pub use dataset::{CsvOptions, Dataset, Row};
pub use error::{Error, Result};
pub use filter::{filter, SearchFilter};
pub use loader::DatasetLoader;
pub use paginate::{paginate, Page, PageSize};
pub use preferences::{FilePreferences, MemoryPreferences, PreferenceStore};
pub use registry::DatasetRegistry;
pub use shuffle::{shuffle, shuffle_seeded, Shuffler};
pub use value::Value;
pub use view::{GalleryState, LoadStatus, LoadTicket, Session, ViewModel};
