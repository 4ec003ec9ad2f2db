use serde::{Deserialize, Serialize};

/// A quotation as stored in the quotes collection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Unique quote identifier
    #[serde(rename = "_id")]
    pub id: String,

    /// The quotation text
    pub content: String,

    /// Display name of the author
    pub author: String,

    /// Slug of the author
    pub author_slug: String,

    /// Reference to the author document
    pub author_id: String,

    /// Topic tags, matched case-insensitively
    #[serde(default)]
    pub tags: Vec<String>,

    /// Length of `content` in characters
    #[serde(default)]
    pub length: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<String>,

    /// Document version marker
    #[serde(rename = "__v", default)]
    pub version: u32,
}

impl Quote {
    /// Fill in `length` from the content when the seed data omits it
    pub fn with_computed_length(mut self) -> Self {
        if self.length == 0 {
            self.length = self.content.chars().count() as u64;
        }
        self
    }
}
