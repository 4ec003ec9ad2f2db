//! Request flows: random quote, quote search, author search

use crate::backend::{Collection, Document, Projection, SearchBackend};
use crate::compiler::{
    assemble_page, build_author_search, build_quote_search, compile_quote_filter, RawParams,
    ResultEnvelope,
};
use crate::error::{AppError, Result};
use std::sync::Arc;

/// Compiles client requests and runs them against a search backend
#[derive(Clone)]
pub struct QuoteService {
    backend: Arc<dyn SearchBackend>,
}

impl QuoteService {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self { backend }
    }

    /// One quote picked uniformly at random among those matching the filters
    pub async fn random_quote(&self, params: &RawParams) -> Result<Document> {
        let filter = compile_quote_filter(params, self.backend.as_ref()).await?;

        let mut picked = self
            .backend
            .sample(Collection::Quotes, &filter, 1, &Projection::QUOTES)
            .await?;

        match picked.pop() {
            Some(quote) => Ok(quote),
            None => {
                tracing::warn!(?filter, "No quote matched the random filter");
                Err(AppError::NotFound(
                    "Could not find any matching quotes".to_string(),
                ))
            }
        }
    }

    /// Full-text or exact-phrase search over quotes
    pub async fn search_quotes(&self, params: &RawParams) -> Result<ResultEnvelope> {
        let search = build_quote_search(params)?;

        assemble_page(
            self.backend.as_ref(),
            Collection::Quotes,
            &search.mode,
            search.pagination,
            &Projection::QUOTES,
        )
        .await
    }

    /// Autocomplete search over author names; an empty query is an empty page
    pub async fn search_authors(&self, params: &RawParams) -> Result<ResultEnvelope> {
        let Some(search) = build_author_search(params) else {
            return Ok(ResultEnvelope::empty());
        };

        assemble_page(
            self.backend.as_ref(),
            Collection::Authors,
            &search.mode,
            search.pagination,
            &Projection::AUTHORS,
        )
        .await
    }
}
