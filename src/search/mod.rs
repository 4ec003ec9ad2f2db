//! Full-text search backend powered by Tantivy
//!
//! This module provides the [`SearchBackend`](crate::backend::SearchBackend)
//! used by the server:
//!
//! - **Phrase Search**: in-order terms with configurable slop
//! - **Full-Text Search**: BM25 ranking across the requested fields
//! - **Autocomplete**: word-prefix and fuzzy matching over author names
//! - **Random Sampling**: uniform pick among quotes matching attribute filters
//! - **Point Lookup**: exact match on keyword fields such as `slug`
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │           TantivyBackend                         │
//! ├─────────────────────────────────────────────────┤
//! │  - find_one()      - sample()                   │
//! │  - search()        - count()                    │
//! └─────────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────────────┐
//! │     QueryBuilder          IndexManager (x2)     │
//! ├─────────────────────────────────────────────────┤
//! │  - SearchMode → Query    - quotes / authors     │
//! │  - QuoteFilter → Query   - build from records   │
//! └─────────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────────────┐
//! │              Tantivy Index                       │
//! ├─────────────────────────────────────────────────┤
//! │  - Folded text (content, author, tags, name)    │
//! │  - Keywords (id, slug, author_id, tag_key)      │
//! │  - Fast field (length), stored JSON source      │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use quotable_search::search::{SearchConfigBuilder, TantivyBackend};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SearchConfigBuilder::new().in_memory().build();
//! let backend = TantivyBackend::build(&config, &[], &[])?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod index;
pub mod query;
pub mod service;

pub use config::{SearchConfig, SearchConfigBuilder};
pub use document::{build_author_schema, build_quote_schema, SearchDocument};
pub use error::{SearchError, SearchResult};
pub use index::{IndexManager, IndexStats};
pub use query::QueryBuilder;
pub use service::TantivyBackend;
