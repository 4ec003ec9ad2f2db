//! The search/store collaborator
//!
//! The compiler only ever talks to a [`SearchBackend`]. Each adapter must
//! handle every [`SearchMode`] variant; the Tantivy adapter lives in
//! [`crate::search`].

use crate::compiler::{Pagination, QuoteFilter, SearchMode};
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// A document as returned to clients, after projection
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Named document collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Collection {
    Quotes,
    Authors,
}

/// Single-field equality lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactMatch {
    pub field: String,
    pub value: String,
}

impl ExactMatch {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Fields suppressed from returned documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projection {
    excluded: &'static [&'static str],
}

impl Projection {
    /// Quotes hide the author reference and version marker
    pub const QUOTES: Projection = Projection {
        excluded: &["__v", "authorId"],
    };

    /// Authors hide alternate names and version marker
    pub const AUTHORS: Projection = Projection {
        excluded: &["__v", "aka"],
    };

    /// Keep every field
    pub const NONE: Projection = Projection { excluded: &[] };

    pub fn excluded(&self) -> &'static [&'static str] {
        self.excluded
    }

    /// Drop excluded fields from a document
    pub fn apply(&self, mut document: Document) -> Document {
        for field in self.excluded {
            document.remove(*field);
        }
        document
    }
}

/// Search-capable, read-only document store
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Fetch the first document whose `field` equals `value`
    async fn find_one(&self, collection: Collection, filter: &ExactMatch)
        -> Result<Option<Document>>;

    /// Uniformly sample up to `size` documents matching `filter`
    async fn sample(
        &self,
        collection: Collection,
        filter: &QuoteFilter,
        size: usize,
        projection: &Projection,
    ) -> Result<Vec<Document>>;

    /// Ranked page of documents matching `criteria`
    async fn search(
        &self,
        collection: Collection,
        criteria: &SearchMode,
        pagination: Pagination,
        projection: &Projection,
    ) -> Result<Vec<Document>>;

    /// Total number of documents matching `criteria`
    async fn count(&self, collection: Collection, criteria: &SearchMode) -> Result<u64>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(value: serde_json::Value) -> Document {
        match value {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_quote_projection() {
        let doc = document(json!({"_id": "q1", "content": "x", "authorId": "a1", "__v": 0}));
        let projected = Projection::QUOTES.apply(doc);

        assert!(projected.contains_key("_id"));
        assert!(projected.contains_key("content"));
        assert!(!projected.contains_key("authorId"));
        assert!(!projected.contains_key("__v"));
    }

    #[test]
    fn test_author_projection() {
        let doc = document(json!({"_id": "a1", "name": "x", "aka": ["y"], "__v": 1}));
        let projected = Projection::AUTHORS.apply(doc);

        assert_eq!(projected.len(), 2);
        assert!(!projected.contains_key("aka"));
    }

    #[test]
    fn test_collection_names() {
        assert_eq!(Collection::Quotes.to_string(), "quotes");
        assert_eq!(Collection::Authors.as_ref(), "authors");
    }
}
