#![allow(clippy::unwrap_used)]
//! Property-based tests for the gallery pipeline.
//!
//! Uses proptest to check filter, pagination, shuffle and analytics
//! invariants across random inputs.

use proptest::prelude::*;
use vitrina::{
    analytics::{analyze, StopwordSet},
    dataset::fields,
    filter::filter,
    paginate::{page_count, paginate},
    shuffle::shuffle_seeded,
    value::{try_parse_number, Value},
    Row,
};

fn row_strategy() -> impl Strategy<Value = Row> {
    ("[a-zA-Z ]{0,20}", "[a-zA-Z ]{0,20}", "[a-z/:.]{0,20}").prop_map(|(alt, title, url)| {
        Row::from_pairs([
            (fields::IMAGE_ALT, alt),
            (fields::ARTICLE_TITLE, title),
            (fields::ARTICLE_URL, url),
        ])
    })
}

fn rows_strategy() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec(row_strategy(), 0..60)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Search filter
// ═══════════════════════════════════════════════════════════════════════════════

proptest! {
    /// Property: filtering twice with the same query changes nothing
    #[test]
    fn prop_filter_idempotent(rows in rows_strategy(), query in "[a-z ]{0,4}") {
        let once = filter(&rows, &query);
        let twice = filter(&once, &query);
        prop_assert_eq!(once, twice);
    }

    /// Property: a longer query never matches more rows
    #[test]
    fn prop_filter_monotonic(rows in rows_strategy(), q in "[a-z]{0,3}", extra in "[a-z]{1,3}") {
        let longer = format!("{q}{extra}");
        prop_assert!(filter(&rows, &longer).len() <= filter(&rows, &q).len());
    }

    /// Property: the empty query is the identity
    #[test]
    fn prop_filter_empty_identity(rows in rows_strategy(), spaces in " {0,5}") {
        prop_assert_eq!(filter(&rows, &spaces), rows);
    }

    /// Property: the result is a subsequence of the input
    #[test]
    fn prop_filter_preserves_order(rows in rows_strategy(), query in "[a-z]{1,2}") {
        let hits = filter(&rows, &query);
        let mut cursor = rows.iter();
        for hit in &hits {
            prop_assert!(cursor.any(|row| row == hit));
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Paginator
// ═══════════════════════════════════════════════════════════════════════════════

proptest! {
    /// Property: the windows of all pages partition the rows exactly once
    #[test]
    fn prop_pages_cover_rows(len in 0usize..500, size in prop::sample::select(vec![10usize, 20, 50, 100])) {
        let rows: Vec<usize> = (0..len).collect();
        let count = page_count(len, size);
        prop_assert!(count >= 1);

        let mut joined = Vec::with_capacity(len);
        for index in 0..count {
            let page = paginate(&rows, size, index);
            prop_assert!(page.window.len() <= size);
            joined.extend_from_slice(page.window);
        }
        prop_assert_eq!(joined, rows);
    }

    /// Property: indices past the last page yield empty windows
    #[test]
    fn prop_out_of_range_empty(len in 0usize..200, size in 1usize..100, past in 0usize..10) {
        let rows: Vec<usize> = (0..len).collect();
        let index = page_count(len, size) + past;
        prop_assert!(paginate(&rows, size, index).window.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Shuffle engine
// ═══════════════════════════════════════════════════════════════════════════════

proptest! {
    /// Property: shuffling yields a permutation of the input
    #[test]
    fn prop_shuffle_is_permutation(items in prop::collection::vec(any::<u16>(), 0..200), seed in any::<u64>()) {
        let mut shuffled = shuffle_seeded(&items, seed);
        let mut sorted = items.clone();
        shuffled.sort_unstable();
        sorted.sort_unstable();
        prop_assert_eq!(shuffled, sorted);
    }

    /// Property: inputs of length 0 or 1 come back unchanged
    #[test]
    fn prop_shuffle_short_unchanged(items in prop::collection::vec(any::<u8>(), 0..=1), seed in any::<u64>()) {
        prop_assert_eq!(shuffle_seeded(&items, seed), items);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Text analytics and coercion
// ═══════════════════════════════════════════════════════════════════════════════

proptest! {
    /// Property: counts add up to the number of non-stopword tokens
    #[test]
    fn prop_counts_match_tokens(rows in rows_strategy()) {
        let stopwords = StopwordSet::english();
        let freq = analyze(&rows, fields::ARTICLE_TITLE, &stopwords);
        let expected: usize = rows
            .iter()
            .map(|row| {
                row.text(fields::ARTICLE_TITLE)
                    .split_whitespace()
                    .filter(|token| !stopwords.contains(token))
                    .count()
            })
            .sum();
        prop_assert_eq!(freq.total(), expected);
        prop_assert!(freq.iter().all(|(token, count)| count > 0 && !stopwords.contains(token)));
    }

    /// Property: coercion never panics and keeps non-numbers as text
    #[test]
    fn prop_coercion_total(raw in "\\PC{0,12}") {
        match try_parse_number(&raw) {
            Value::Null => prop_assert!(raw.is_empty()),
            Value::Number(n) => prop_assert!(n.is_finite()),
            Value::Text(text) => prop_assert_eq!(text, raw),
        }
    }

    /// Property: integers within 2^53 are coerced to numbers
    #[test]
    fn prop_small_integers_coerced(n in -(1i64 << 52)..(1i64 << 52)) {
        prop_assert_eq!(try_parse_number(&n.to_string()), Value::Number(n as f64));
    }
}
