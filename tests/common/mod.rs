//! Common test utilities
//!
//! Seed-data fixtures, a Tantivy backend over them, and a recording mock
//! backend for asserting which collaborator calls a request makes.

#![allow(dead_code)]

use async_trait::async_trait;
use quotable_search::backend::{Collection, Document, ExactMatch, Projection, SearchBackend};
use quotable_search::compiler::{Pagination, QuoteFilter, RawParams, SearchMode};
use quotable_search::models::{load_authors, load_quotes, Author, Quote};
use quotable_search::search::{SearchConfig, TantivyBackend};
use quotable_search::{AppError, Result};
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Build raw request parameters from pairs
pub fn params(pairs: &[(&str, &str)]) -> RawParams {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn data_path(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(file)
}

/// The bundled seed quotes
pub fn seed_quotes() -> Vec<Quote> {
    load_quotes(data_path("quotes.json")).unwrap()
}

/// The bundled seed authors
pub fn seed_authors() -> Vec<Author> {
    load_authors(data_path("authors.json")).unwrap()
}

/// In-memory Tantivy backend over the seed data
pub fn seed_backend() -> TantivyBackend {
    TantivyBackend::build(&SearchConfig::default(), &seed_quotes(), &seed_authors()).unwrap()
}

/// Document ids in result order
pub fn ids(docs: &[Document]) -> Vec<String> {
    docs.iter()
        .filter_map(|d| d.get("_id")?.as_str().map(str::to_string))
        .collect()
}

/// Which canned failure a [`RecordingBackend`] injects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Failure {
    #[default]
    None,
    Search,
    Count,
}

/// Mock backend that records every call and answers with canned data
#[derive(Default)]
pub struct RecordingBackend {
    pub find_one_calls: AtomicUsize,
    pub sample_calls: AtomicUsize,
    pub search_calls: AtomicUsize,
    pub count_calls: AtomicUsize,

    /// Criteria of the last search, for assertions
    pub last_criteria: Mutex<Option<SearchMode>>,

    /// Pagination of the last search
    pub last_pagination: Mutex<Option<Pagination>>,

    /// Total reported by `count`
    pub total: u64,

    /// Documents returned by `search` and `sample`
    pub documents: Vec<Document>,

    pub failure: Failure,
}

impl RecordingBackend {
    pub fn with_results(documents: usize, total: u64) -> Self {
        Self {
            documents: (0..documents)
                .map(|i| {
                    json!({"_id": format!("doc-{}", i), "content": "x", "authorId": "a", "__v": 0})
                        .as_object()
                        .cloned()
                        .unwrap()
                })
                .collect(),
            total,
            ..Default::default()
        }
    }

    pub fn failing(failure: Failure) -> Self {
        Self {
            failure,
            ..Self::with_results(3, 3)
        }
    }

    pub fn backend_calls(&self) -> usize {
        self.find_one_calls.load(Ordering::SeqCst)
            + self.sample_calls.load(Ordering::SeqCst)
            + self.search_calls.load(Ordering::SeqCst)
            + self.count_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchBackend for RecordingBackend {
    async fn find_one(
        &self,
        _collection: Collection,
        _filter: &ExactMatch,
    ) -> Result<Option<Document>> {
        self.find_one_calls.fetch_add(1, Ordering::SeqCst);
        Ok(None)
    }

    async fn sample(
        &self,
        _collection: Collection,
        _filter: &QuoteFilter,
        size: usize,
        projection: &Projection,
    ) -> Result<Vec<Document>> {
        self.sample_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .documents
            .iter()
            .take(size)
            .cloned()
            .map(|d| projection.apply(d))
            .collect())
    }

    async fn search(
        &self,
        _collection: Collection,
        criteria: &SearchMode,
        pagination: Pagination,
        projection: &Projection,
    ) -> Result<Vec<Document>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_criteria.lock().unwrap() = Some(criteria.clone());
        *self.last_pagination.lock().unwrap() = Some(pagination);

        if self.failure == Failure::Search {
            return Err(AppError::Backend("search unavailable".to_string()));
        }

        Ok(self
            .documents
            .iter()
            .take(pagination.limit as usize)
            .cloned()
            .map(|d| projection.apply(d))
            .collect())
    }

    async fn count(&self, _collection: Collection, _criteria: &SearchMode) -> Result<u64> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);

        if self.failure == Failure::Count {
            return Err(AppError::Backend("count unavailable".to_string()));
        }

        Ok(self.total)
    }
}
