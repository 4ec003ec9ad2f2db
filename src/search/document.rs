//! Index schemas and document conversion

use crate::compiler::FOLDED_TOKENIZER;
use crate::models::{Author, Quote};
use crate::search::error::{SearchError, SearchResult};
use tantivy::schema::*;
use tantivy::TantivyDocument;

/// Stored JSON copy of the original record
pub const SOURCE_FIELD: &str = "source";

/// Trait for records that can be indexed and searched
pub trait SearchDocument {
    /// Convert to Tantivy document
    fn to_tantivy_doc(&self, schema: &Schema) -> SearchResult<TantivyDocument>;

    /// Get document ID
    fn document_id(&self) -> String;
}

fn field(schema: &Schema, name: &str) -> SearchResult<Field> {
    schema
        .get_field(name)
        .map_err(|e| SearchError::SchemaError(format!("{}: {}", name, e)))
}

fn source_json<T: serde::Serialize>(record: &T) -> SearchResult<String> {
    serde_json::to_string(record).map_err(|e| SearchError::IndexingFailed(e.to_string()))
}

impl SearchDocument for Quote {
    fn to_tantivy_doc(&self, schema: &Schema) -> SearchResult<TantivyDocument> {
        let mut doc = TantivyDocument::new();

        doc.add_text(field(schema, "id")?, &self.id);
        doc.add_text(field(schema, "content")?, &self.content);
        doc.add_text(field(schema, "author")?, &self.author);
        doc.add_text(field(schema, "author_name")?, &self.author);
        doc.add_text(field(schema, "author_id")?, &self.author_id);

        let tags = field(schema, "tags")?;
        let tag_key = field(schema, "tag_key")?;
        for tag in &self.tags {
            doc.add_text(tags, tag);
            doc.add_text(tag_key, tag.to_lowercase());
        }

        doc.add_u64(field(schema, "length")?, self.length);
        doc.add_text(field(schema, SOURCE_FIELD)?, source_json(self)?);

        Ok(doc)
    }

    fn document_id(&self) -> String {
        self.id.clone()
    }
}

impl SearchDocument for Author {
    fn to_tantivy_doc(&self, schema: &Schema) -> SearchResult<TantivyDocument> {
        let mut doc = TantivyDocument::new();

        doc.add_text(field(schema, "id")?, &self.id);
        doc.add_text(field(schema, "slug")?, &self.slug);
        doc.add_text(field(schema, "name")?, &self.name);

        let aka = field(schema, "aka")?;
        for name in &self.aka {
            doc.add_text(aka, name);
        }

        doc.add_text(field(schema, SOURCE_FIELD)?, source_json(self)?);

        Ok(doc)
    }

    fn document_id(&self) -> String {
        self.id.clone()
    }
}

/// Full-text options: folded tokens with positions for phrase queries
fn folded_text() -> TextOptions {
    let indexing = TextFieldIndexing::default()
        .set_tokenizer(FOLDED_TOKENIZER)
        .set_index_option(IndexRecordOption::WithFreqsAndPositions);
    TextOptions::default().set_indexing_options(indexing)
}

/// Build the search schema for quotes
pub fn build_quote_schema() -> Schema {
    let mut schema_builder = Schema::builder();

    // Exact-match keys
    schema_builder.add_text_field("id", STRING);
    schema_builder.add_text_field("author_id", STRING);
    schema_builder.add_text_field("author_name", STRING);
    schema_builder.add_text_field("tag_key", STRING);

    // Searchable text
    schema_builder.add_text_field("content", folded_text());
    schema_builder.add_text_field("author", folded_text());
    schema_builder.add_text_field("tags", folded_text());

    schema_builder.add_u64_field("length", INDEXED | FAST);

    schema_builder.add_text_field(SOURCE_FIELD, STORED);

    schema_builder.build()
}

/// Build the search schema for authors
pub fn build_author_schema() -> Schema {
    let mut schema_builder = Schema::builder();

    schema_builder.add_text_field("id", STRING);
    schema_builder.add_text_field("slug", STRING);

    schema_builder.add_text_field("name", folded_text());
    schema_builder.add_text_field("aka", folded_text());

    schema_builder.add_text_field(SOURCE_FIELD, STORED);

    schema_builder.build()
}
