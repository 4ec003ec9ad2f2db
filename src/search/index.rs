//! Search index management

use crate::compiler::{folded_analyzer, FOLDED_TOKENIZER};
use crate::search::config::SearchConfig;
use crate::search::document::SearchDocument;
use crate::search::error::{SearchError, SearchResult};
use serde::{Deserialize, Serialize};
use tantivy::collector::Count;
use tantivy::directory::MmapDirectory;
use tantivy::schema::Schema;
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy};

/// Index statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexStats {
    /// Total number of documents in the index
    pub total_documents: u64,

    /// Number of segments
    pub num_segments: usize,
}

/// Owns one Tantivy index and its reader.
///
/// The collections are read-only, so the index is (re)built once from the
/// seed records and the writer is dropped after the commit.
pub struct IndexManager {
    /// Collection name, used for logging and the on-disk subdirectory
    name: &'static str,

    /// The Tantivy index
    index: Index,

    /// The schema
    schema: Schema,

    /// Index reader
    reader: IndexReader,
}

impl IndexManager {
    /// Build an index named `name` holding `documents`
    pub fn build<D: SearchDocument>(
        name: &'static str,
        schema: Schema,
        documents: &[D],
        config: &SearchConfig,
    ) -> SearchResult<Self> {
        let index = Self::open_or_create(name, schema.clone(), config)?;
        index.tokenizers().register(FOLDED_TOKENIZER, folded_analyzer());

        let mut writer: IndexWriter = index
            .writer_with_num_threads(config.indexing_threads.max(1), config.writer_heap_size)
            .map_err(|e| SearchError::IndexInitFailed(format!("Failed to create writer: {}", e)))?;

        // Seed data is authoritative; drop whatever a previous run left behind
        writer
            .delete_all_documents()
            .map_err(|e| SearchError::IndexingFailed(format!("Failed to clear index: {}", e)))?;

        for (indexed, document) in documents.iter().enumerate() {
            let tantivy_doc = document.to_tantivy_doc(&schema)?;
            writer.add_document(tantivy_doc).map_err(|e| {
                SearchError::IndexingFailed(format!(
                    "Failed to add document {} ({}): {}",
                    indexed,
                    document.document_id(),
                    e
                ))
            })?;
        }

        writer
            .commit()
            .map_err(|e| SearchError::IndexingFailed(format!("Failed to commit batch: {}", e)))?;

        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e| SearchError::IndexInitFailed(format!("Failed to create reader: {}", e)))?;

        tracing::info!(index = name, documents = documents.len(), "Search index built");

        Ok(Self {
            name,
            index,
            schema,
            reader,
        })
    }

    fn open_or_create(
        name: &'static str,
        schema: Schema,
        config: &SearchConfig,
    ) -> SearchResult<Index> {
        let Some(root) = &config.index_path else {
            return Ok(Index::create_in_ram(schema));
        };

        let path = root.join(name);
        std::fs::create_dir_all(&path).map_err(|e| {
            SearchError::IndexInitFailed(format!("Failed to create index directory: {}", e))
        })?;

        let directory = MmapDirectory::open(&path).map_err(|e| {
            SearchError::IndexInitFailed(format!("Failed to open index directory: {}", e))
        })?;

        Index::open_or_create(directory, schema)
            .map_err(|e| SearchError::IndexInitFailed(format!("Failed to open index: {}", e)))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Get the schema
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Get the index
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Get the reader
    pub fn reader(&self) -> &IndexReader {
        &self.reader
    }

    /// Get index statistics
    pub fn get_stats(&self) -> SearchResult<IndexStats> {
        let searcher = self.reader.searcher();

        let total_documents = searcher
            .search(&tantivy::query::AllQuery, &Count)
            .map_err(|e| SearchError::SearchFailed(format!("Failed to count documents: {}", e)))?
            as u64;

        Ok(IndexStats {
            total_documents,
            num_segments: searcher.segment_readers().len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Author;
    use crate::search::document::build_author_schema;
    use tempfile::TempDir;

    fn author(id: &str, name: &str) -> Author {
        Author {
            id: id.to_string(),
            name: name.to_string(),
            slug: name.to_lowercase().replace(' ', "-"),
            aka: vec![],
            bio: String::new(),
            description: String::new(),
            link: String::new(),
            quote_count: 0,
            date_added: None,
            date_modified: None,
            version: 0,
        }
    }

    #[test]
    fn test_in_memory_index() {
        let authors = vec![author("a1", "Mark Twain"), author("a2", "Oscar Wilde")];
        let manager =
            IndexManager::build("authors", build_author_schema(), &authors, &SearchConfig::default())
                .unwrap();

        let stats = manager.get_stats().unwrap();
        assert_eq!(stats.total_documents, 2);
        assert_eq!(manager.name(), "authors");
    }

    #[test]
    fn test_on_disk_rebuild_replaces_documents() {
        let temp_dir = TempDir::new().unwrap();
        let config = SearchConfig {
            index_path: Some(temp_dir.path().to_path_buf()),
            ..Default::default()
        };

        let first = vec![author("a1", "Mark Twain"), author("a2", "Oscar Wilde")];
        IndexManager::build("authors", build_author_schema(), &first, &config).unwrap();
        assert!(temp_dir.path().join("authors").join("meta.json").exists());

        let second = vec![author("a3", "Maya Angelou")];
        let manager =
            IndexManager::build("authors", build_author_schema(), &second, &config).unwrap();
        assert_eq!(manager.get_stats().unwrap().total_documents, 1);
    }
}
