//! Search mode selection

use super::fields::{parse_quote_fields, SearchField, AUTHOR_SEARCH_FIELDS};
use super::normalize::{normalize, NormalizedQuery};
use super::params::{parse_bool, resolve_pagination, resolve_slop, Pagination};
use super::{param, RawParams};
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};

/// Edit tolerance for complete author-name terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuzzyOptions {
    /// Maximum number of single-character edits
    pub max_edits: u8,

    /// Leading characters that must match exactly
    pub prefix_length: usize,
}

impl Default for FuzzyOptions {
    fn default() -> Self {
        Self {
            max_edits: 1,
            prefix_length: 2,
        }
    }
}

/// Compiled search criteria. Exactly one variant is active per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SearchMode {
    /// All terms in order, within `slop` positions
    ExactPhrase {
        text: String,
        fields: Vec<SearchField>,
        slop: u32,
    },

    /// Any of the terms, ranked by relevance
    FullText {
        text: String,
        fields: Vec<SearchField>,
    },

    /// Type-ahead search.
    ///
    /// Both clauses are mandatory when present: the prefix clause matches
    /// `prefix_term` as a word prefix; the fuzzy clause requires at least one
    /// of `complete_terms` to match within `fuzzy.max_edits`.
    AutocompleteCompound {
        fields: Vec<SearchField>,
        complete_terms: Vec<String>,
        prefix_term: Option<String>,
        fuzzy: FuzzyOptions,
    },
}

/// A compiled quote search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteSearch {
    pub mode: SearchMode,
    pub pagination: Pagination,
}

/// A compiled author search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorSearch {
    pub mode: SearchMode,
    pub pagination: Pagination,
}

/// Interior of a query wrapped in one matching pair of `"` or `'`
pub fn detect_exact_phrase(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    let first = trimmed.chars().next()?;
    let last = trimmed.chars().next_back()?;

    if !matches!(first, '"' | '\'') || first != last {
        return None;
    }

    // both quote characters are one byte wide
    let inner = trimmed.get(1..trimmed.len().checked_sub(1)?)?;
    (!inner.is_empty()).then_some(inner)
}

/// Compile a quote search request
pub fn build_quote_search(params: &RawParams) -> Result<QuoteSearch> {
    let raw = param(params, "query").unwrap_or_default();
    let phrase = detect_exact_phrase(raw);
    let query = normalize(Some(phrase.unwrap_or(raw)));

    if query.is_empty() {
        return Err(AppError::missing_parameter("query"));
    }

    let fields = parse_quote_fields(param(params, "path"))?;
    let pagination = resolve_pagination(params);

    let mode = if phrase.is_some() {
        SearchMode::ExactPhrase {
            text: query.text,
            fields,
            slop: resolve_slop(params),
        }
    } else {
        SearchMode::FullText {
            text: query.text,
            fields,
        }
    };

    tracing::debug!(?mode, ?pagination, "Compiled quote search");
    Ok(QuoteSearch { mode, pagination })
}

/// Split a normalized query into complete terms and an in-progress prefix.
/// `None` when the query has no words.
pub fn autocomplete_mode(query: &NormalizedQuery, autocomplete: bool) -> Option<SearchMode> {
    if query.is_empty() {
        return None;
    }

    let mut complete_terms = query.tokens.clone();
    let prefix_term = if autocomplete && !query.trailing_whitespace {
        complete_terms.pop()
    } else {
        None
    };

    Some(SearchMode::AutocompleteCompound {
        fields: AUTHOR_SEARCH_FIELDS.to_vec(),
        complete_terms,
        prefix_term,
        fuzzy: FuzzyOptions::default(),
    })
}

/// Compile an author search request. `None` means the query is empty and
/// the caller should answer with an empty page.
pub fn build_author_search(params: &RawParams) -> Option<AuthorSearch> {
    let query = normalize(param(params, "query"));
    let autocomplete = parse_bool(param(params, "autocomplete"), true);

    let mode = autocomplete_mode(&query, autocomplete)?;
    let pagination = resolve_pagination(params);

    tracing::debug!(?mode, ?pagination, "Compiled author search");
    Some(AuthorSearch { mode, pagination })
}
