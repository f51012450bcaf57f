//! Benchmarks for the gallery pipeline.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::explicit_iter_loop,
    missing_docs
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use vitrina::{
    analytics::{analyze, StopwordSet},
    dataset::fields,
    filter::filter,
    paginate::paginate,
    shuffle::shuffle_seeded,
    Dataset, GalleryState, Row,
};

const WORDS: [&str; 12] = [
    "campus", "library", "the", "of", "wolfpack", "students", "research", "a", "spring",
    "engineering", "and", "game",
];

fn create_csv(rows: usize) -> String {
    let mut csv =
        String::from("id,urlkey,article_title,image_url,image_alt,article_url,bw_ratio\n");
    for i in 0..rows {
        let title: Vec<&str> = (0..8).map(|k| WORDS[(i * 7 + k * 3) % WORDS.len()]).collect();
        csv.push_str(&format!(
            "{i},\"edu,ncsu)/news/{i}\",\"{}\",https://img.example/{i}.jpg,Photo {i} of {},\
             https://news.example/{i},0.{}\n",
            title.join(" "),
            WORDS[i % WORDS.len()],
            i % 100
        ));
    }
    csv
}

fn create_rows(rows: usize) -> Vec<Row> {
    Dataset::from_csv_str(&create_csv(rows))
        .expect("Failed to parse dataset")
        .into_rows()
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [1_000, 10_000, 50_000].iter() {
        let csv = create_csv(*size);
        group.throughput(Throughput::Bytes(csv.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &csv, |b, csv| {
            b.iter(|| Dataset::from_csv_str(black_box(csv)).expect("parse"));
        });
    }

    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");

    for size in [1_000, 10_000, 50_000].iter() {
        let rows = create_rows(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &rows, |b, rows| {
            b.iter(|| filter(black_box(rows), black_box("wolfpack")));
        });
    }

    group.finish();
}

fn bench_shuffle(c: &mut Criterion) {
    let mut group = c.benchmark_group("shuffle");

    for size in [1_000, 10_000, 50_000].iter() {
        let rows = create_rows(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &rows, |b, rows| {
            b.iter(|| shuffle_seeded(black_box(rows), 42));
        });
    }

    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    let stopwords = StopwordSet::english();

    for size in [1_000, 10_000, 50_000].iter() {
        let rows = create_rows(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &rows, |b, rows| {
            b.iter(|| analyze(black_box(rows), fields::ARTICLE_TITLE, &stopwords));
        });
    }

    group.finish();
}

fn bench_paginate(c: &mut Criterion) {
    let rows = create_rows(10_000);

    c.bench_function("paginate_10k", |b| {
        b.iter(|| {
            let mut total = 0;
            for index in 0..200 {
                total += paginate(black_box(&rows), 50, index).window.len();
            }
            black_box(total)
        });
    });
}

fn bench_query_change(c: &mut Criterion) {
    let mut state = GalleryState::new();
    let dataset = Dataset::from_csv_str(&create_csv(10_000)).expect("parse");
    state.install("bench", dataset);

    c.bench_function("set_query_10k", |b| {
        let queries = ["w", "wo", "wol", "wolf", ""];
        b.iter(|| {
            for query in queries.iter() {
                state.set_query(*query);
            }
            black_box(state.view_model().filtered_rows)
        });
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_filter,
    bench_shuffle,
    bench_analyze,
    bench_paginate,
    bench_query_change
);
criterion_main!(benches);
