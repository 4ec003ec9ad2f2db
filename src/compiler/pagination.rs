//! Paginated response assembly

use super::criteria::SearchMode;
use super::params::Pagination;
use crate::backend::{Collection, Document, Projection, SearchBackend};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// One page of search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEnvelope {
    /// Number of documents in `results`
    pub count: u64,

    /// Number of matching documents across all pages
    pub total_count: u64,

    /// Offset of the next page, or `null` when this is the last one
    pub last_item_index: Option<u64>,

    pub results: Vec<Document>,
}

impl ResultEnvelope {
    /// A page with no results and no further pages
    pub fn empty() -> Self {
        Self {
            count: 0,
            total_count: 0,
            last_item_index: None,
            results: Vec::new(),
        }
    }

    /// Build the envelope for a fetched page
    pub fn from_page(results: Vec<Document>, total_count: u64, pagination: Pagination) -> Self {
        let count = results.len() as u64;
        Self {
            count,
            total_count,
            last_item_index: last_item_index(pagination.skip, count, total_count),
            results,
        }
    }
}

/// `skip + count` while more documents remain, otherwise `None`
pub fn last_item_index(skip: u64, count: u64, total_count: u64) -> Option<u64> {
    let next = skip.saturating_add(count);
    (next < total_count).then_some(next)
}

/// Fetch one page and the total match count concurrently, then build the
/// envelope. Either failure fails the whole request.
pub async fn assemble_page(
    backend: &dyn SearchBackend,
    collection: Collection,
    criteria: &SearchMode,
    pagination: Pagination,
    projection: &Projection,
) -> Result<ResultEnvelope> {
    let (results, total_count) = futures::try_join!(
        backend.search(collection, criteria, pagination, projection),
        backend.count(collection, criteria),
    )?;

    tracing::debug!(
        collection = %collection,
        count = results.len(),
        total_count,
        skip = pagination.skip,
        limit = pagination.limit,
        "Assembled result page"
    );

    Ok(ResultEnvelope::from_page(results, total_count, pagination))
}
