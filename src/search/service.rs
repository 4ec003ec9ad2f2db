//! Tantivy implementation of the search backend

use crate::backend::{Collection, Document, ExactMatch, Projection, SearchBackend};
use crate::compiler::{Pagination, QuoteFilter, SearchMode};
use crate::error::Result;
use crate::models::{Author, Quote};
use crate::search::config::SearchConfig;
use crate::search::document::{build_author_schema, build_quote_schema, SOURCE_FIELD};
use crate::search::error::{SearchError, SearchResult};
use crate::search::index::{IndexManager, IndexStats};
use crate::search::query::QueryBuilder;
use async_trait::async_trait;
use rand::seq::SliceRandom;
use tantivy::collector::{Count, DocSetCollector, TopDocs};
use tantivy::query::Query;
use tantivy::schema::Value;
use tantivy::{DocAddress, Searcher, TantivyDocument};

/// Read-only quotes and authors indexes
pub struct TantivyBackend {
    quotes: IndexManager,
    authors: IndexManager,
}

impl TantivyBackend {
    /// Index the seed records and open readers on them
    pub fn build(config: &SearchConfig, quotes: &[Quote], authors: &[Author]) -> SearchResult<Self> {
        let quotes = IndexManager::build("quotes", build_quote_schema(), quotes, config)?;
        let authors = IndexManager::build("authors", build_author_schema(), authors, config)?;

        Ok(Self { quotes, authors })
    }

    fn index(&self, collection: Collection) -> &IndexManager {
        match collection {
            Collection::Quotes => &self.quotes,
            Collection::Authors => &self.authors,
        }
    }

    /// Get index statistics for a collection
    pub fn get_stats(&self, collection: Collection) -> SearchResult<IndexStats> {
        self.index(collection).get_stats()
    }

    fn find_one_sync(&self, collection: Collection, filter: &ExactMatch) -> SearchResult<Option<Document>> {
        let manager = self.index(collection);
        let query = QueryBuilder::new(manager.schema()).build_exact(filter)?;
        let searcher = manager.reader().searcher();

        let top_docs = searcher
            .search(&*query, &TopDocs::with_limit(1))
            .map_err(|e| SearchError::SearchFailed(format!("Lookup failed: {}", e)))?;

        top_docs
            .into_iter()
            .next()
            .map(|(_, address)| stored_document(manager, &searcher, address))
            .transpose()
    }

    fn sample_sync(
        &self,
        collection: Collection,
        filter: &QuoteFilter,
        size: usize,
        projection: &Projection,
    ) -> SearchResult<Vec<Document>> {
        let manager = self.index(collection);
        let query = QueryBuilder::new(manager.schema()).build_filter(filter)?;
        let searcher = manager.reader().searcher();

        let matching = searcher
            .search(&*query, &DocSetCollector)
            .map_err(|e| SearchError::SearchFailed(format!("Sample failed: {}", e)))?;

        // The collector yields a set; order it so sampling only depends on the rng
        let mut candidates: Vec<DocAddress> = matching.into_iter().collect();
        candidates.sort();

        let picked: Vec<DocAddress> = candidates
            .choose_multiple(&mut rand::thread_rng(), size)
            .copied()
            .collect();

        picked
            .into_iter()
            .map(|address| stored_document(manager, &searcher, address).map(|d| projection.apply(d)))
            .collect()
    }

    fn search_sync(
        &self,
        collection: Collection,
        criteria: &SearchMode,
        pagination: Pagination,
        projection: &Projection,
    ) -> SearchResult<Vec<Document>> {
        if pagination.limit == 0 {
            return Ok(Vec::new());
        }

        let manager = self.index(collection);
        let query = QueryBuilder::new(manager.schema()).build(criteria)?;
        let searcher = manager.reader().searcher();

        let collector =
            TopDocs::with_limit(pagination.limit as usize).and_offset(pagination.skip as usize);

        let top_docs = searcher
            .search(&*query, &collector)
            .map_err(|e| SearchError::SearchFailed(format!("Search execution failed: {}", e)))?;

        top_docs
            .into_iter()
            .map(|(_, address)| stored_document(manager, &searcher, address).map(|d| projection.apply(d)))
            .collect()
    }

    fn count_sync(&self, collection: Collection, criteria: &SearchMode) -> SearchResult<u64> {
        let manager = self.index(collection);
        let query: Box<dyn Query> =
            QueryBuilder::new(manager.schema()).build(criteria)?;

        let total = manager
            .reader()
            .searcher()
            .search(&*query, &Count)
            .map_err(|e| SearchError::SearchFailed(format!("Count failed: {}", e)))?;

        Ok(total as u64)
    }
}

/// Decode the stored JSON copy of a record
fn stored_document(
    manager: &IndexManager,
    searcher: &Searcher,
    address: DocAddress,
) -> SearchResult<Document> {
    let doc: TantivyDocument = searcher
        .doc(address)
        .map_err(|e| SearchError::SearchFailed(format!("Failed to retrieve doc: {}", e)))?;

    let field = manager
        .schema()
        .get_field(SOURCE_FIELD)
        .map_err(|e| SearchError::SchemaError(e.to_string()))?;

    let source = doc.get_first(field).and_then(|v| v.as_str()).ok_or_else(|| {
        SearchError::CorruptDocument(format!("{} document without source", manager.name()))
    })?;

    serde_json::from_str(source).map_err(|e| SearchError::CorruptDocument(e.to_string()))
}

#[async_trait]
impl SearchBackend for TantivyBackend {
    async fn find_one(
        &self,
        collection: Collection,
        filter: &ExactMatch,
    ) -> Result<Option<Document>> {
        Ok(self.find_one_sync(collection, filter)?)
    }

    async fn sample(
        &self,
        collection: Collection,
        filter: &QuoteFilter,
        size: usize,
        projection: &Projection,
    ) -> Result<Vec<Document>> {
        Ok(self.sample_sync(collection, filter, size, projection)?)
    }

    async fn search(
        &self,
        collection: Collection,
        criteria: &SearchMode,
        pagination: Pagination,
        projection: &Projection,
    ) -> Result<Vec<Document>> {
        Ok(self.search_sync(collection, criteria, pagination, projection)?)
    }

    async fn count(&self, collection: Collection, criteria: &SearchMode) -> Result<u64> {
        Ok(self.count_sync(collection, criteria)?)
    }
}
