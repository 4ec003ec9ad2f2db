// Request compilation and search benchmarks
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use quotable_search::compiler::{build_author_search, build_quote_search, normalize, RawParams};
use quotable_search::models::{load_authors, load_quotes};
use quotable_search::search::{SearchConfig, TantivyBackend};
use quotable_search::service::QuoteService;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

fn params(pairs: &[(&str, &str)]) -> RawParams {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn seed_service() -> QuoteService {
    let data = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data");
    let quotes = load_quotes(data.join("quotes.json")).unwrap();
    let authors = load_authors(data.join("authors.json")).unwrap();
    let backend = TantivyBackend::build(&SearchConfig::default(), &quotes, &authors).unwrap();
    QuoteService::new(Arc::new(backend))
}

fn normalizer(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for query in ["twain", "Gabriel García Márquez", "the quick, brown fox jumps over the lazy dog "] {
        group.bench_with_input(BenchmarkId::from_parameter(query), &query, |b, &query| {
            b.iter(|| normalize(black_box(Some(query))))
        });
    }
    group.finish();
}

fn criteria_builder(c: &mut Criterion) {
    let quote_full_text = params(&[("query", "life is simple"), ("limit", "10")]);
    let quote_phrase = params(&[("query", "\"life is simple\""), ("slop", "2")]);
    let author = params(&[("query", "friendship quot")]);

    c.bench_function("build_quote_search_full_text", |b| {
        b.iter(|| build_quote_search(black_box(&quote_full_text)))
    });
    c.bench_function("build_quote_search_phrase", |b| {
        b.iter(|| build_quote_search(black_box(&quote_phrase)))
    });
    c.bench_function("build_author_search_autocomplete", |b| {
        b.iter(|| build_author_search(black_box(&author)))
    });
}

fn end_to_end(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let service = seed_service();
    let quotes = params(&[("query", "life")]);
    let authors = params(&[("query", "mark tw")]);
    let random = params(&[("tags", "wisdom")]);

    c.bench_function("search_quotes_seed", |b| {
        b.to_async(&rt).iter(|| service.search_quotes(black_box(&quotes)))
    });
    c.bench_function("search_authors_seed", |b| {
        b.to_async(&rt).iter(|| service.search_authors(black_box(&authors)))
    });
    c.bench_function("random_quote_seed", |b| {
        b.to_async(&rt).iter(|| service.random_quote(black_box(&random)))
    });
}

criterion_group!(benches, normalizer, criteria_builder, end_to_end);
criterion_main!(benches);
