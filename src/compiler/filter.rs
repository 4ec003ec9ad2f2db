//! Attribute filters for random quote retrieval

use super::params::{clamp_param, LENGTH_BOUNDS};
use super::{param, RawParams};
use crate::backend::{Collection, ExactMatch, SearchBackend};
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Inclusive length range; a missing bound is unbounded on that side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LengthRange {
    pub min: Option<u64>,
    pub max: Option<u64>,
}

/// Conjunction of the attribute predicates a client supplied.
/// `None` means the attribute is unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteFilter {
    pub length: Option<LengthRange>,

    /// Lower-cased tags; a quote matches if it has any of them
    pub tags: Option<BTreeSet<String>>,

    /// Author identifiers; a quote matches if its `authorId` is one of them
    pub author_ids: Option<Vec<String>>,

    /// Author display names; exact match against `author`
    pub authors: Option<Vec<String>>,
}

impl QuoteFilter {
    /// True when no predicate is present
    pub fn is_unrestricted(&self) -> bool {
        self.length.is_none()
            && self.tags.is_none()
            && self.author_ids.is_none()
            && self.authors.is_none()
    }
}

/// Split a delimited list, dropping blank entries. `None` if nothing is left.
pub fn split_list(raw: Option<&str>, delimiters: &[char]) -> Option<Vec<String>> {
    let items: Vec<String> = raw?
        .split(delimiters)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect();

    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

/// Build the filter for a random quote request.
///
/// `authorSlug` is resolved with a single lookup against the authors
/// collection; an unknown slug is `NotFound`, never an unconstrained filter.
pub async fn compile_quote_filter(
    params: &RawParams,
    backend: &dyn SearchBackend,
) -> Result<QuoteFilter> {
    let min = clamp_param(param(params, "minLength"), LENGTH_BOUNDS);
    let max = clamp_param(param(params, "maxLength"), LENGTH_BOUNDS);
    let length = (min.is_some() || max.is_some()).then(|| LengthRange {
        min: min.map(|v| v as u64),
        max: max.map(|v| v as u64),
    });

    let tags = split_list(param(params, "tags"), &['|', ','])
        .map(|tags| tags.into_iter().map(|tag| tag.to_lowercase()).collect());

    let mut author_ids = split_list(param(params, "authorId"), &['|']);
    let authors = split_list(param(params, "author"), &['|']);

    if let Some(slug) = param(params, "authorSlug").map(str::trim).filter(|s| !s.is_empty()) {
        let author = backend
            .find_one(Collection::Authors, &ExactMatch::new("slug", slug))
            .await?;

        let Some(author) = author else {
            tracing::warn!(slug = %slug, "authorSlug did not match any author");
            return Err(AppError::NotFound(format!(
                "Could not find any author with slug `{}`",
                slug
            )));
        };

        let id = author
            .get("_id")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| AppError::Backend(format!("author `{}` has no _id", slug)))?;

        author_ids = Some(vec![id.to_string()]);
    }

    let filter = QuoteFilter {
        length,
        tags,
        author_ids,
        authors,
    };

    tracing::debug!(?filter, "Compiled quote filter");
    Ok(filter)
}
