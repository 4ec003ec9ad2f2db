use serde::{Deserialize, Serialize};

/// An author as stored in the authors collection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Unique author identifier
    #[serde(rename = "_id")]
    pub id: String,

    /// Full display name
    pub name: String,

    /// URL-safe unique name
    pub slug: String,

    /// Alternate names (pen names, transliterations, full legal names)
    #[serde(default)]
    pub aka: Vec<String>,

    /// Short biography
    #[serde(default)]
    pub bio: String,

    /// One-line description
    #[serde(default)]
    pub description: String,

    /// Reference link (usually Wikipedia)
    #[serde(default)]
    pub link: String,

    /// Number of quotes attributed to this author
    #[serde(default)]
    pub quote_count: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<String>,

    /// Document version marker
    #[serde(rename = "__v", default)]
    pub version: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_defaults() {
        let author: Author = serde_json::from_str(
            r#"{"_id":"a1","name":"Mark Twain","slug":"mark-twain"}"#,
        )
        .unwrap();

        assert!(author.aka.is_empty());
        assert_eq!(author.quote_count, 0);
        assert_eq!(author.version, 0);
    }

    #[test]
    fn test_author_wire_names() {
        let author: Author = serde_json::from_str(
            r#"{"_id":"a1","name":"Mark Twain","slug":"mark-twain","aka":["Samuel Clemens"],"quoteCount":3}"#,
        )
        .unwrap();

        let value = serde_json::to_value(&author).unwrap();
        assert_eq!(value["quoteCount"], 3);
        assert_eq!(value["aka"][0], "Samuel Clemens");
    }
}
