//! Searchable field whitelist

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumString};

/// A document field that text search may run against
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SearchField {
    Content,
    Author,
    Tags,
    Name,
    Aka,
}

/// Fields a client may name in the quote search `path` parameter
pub const QUOTE_SEARCH_FIELDS: [SearchField; 3] =
    [SearchField::Content, SearchField::Author, SearchField::Tags];

/// Fields used by author search; not configurable by clients
pub const AUTHOR_SEARCH_FIELDS: [SearchField; 2] = [SearchField::Name, SearchField::Aka];

pub const DEFAULT_QUOTE_FIELDS: &str = "content,author";

/// Parse and validate the comma separated `path` parameter
pub fn parse_quote_fields(raw: Option<&str>) -> Result<Vec<SearchField>> {
    let raw = raw.unwrap_or(DEFAULT_QUOTE_FIELDS);
    let mut fields = Vec::new();

    for name in raw.split(',').map(str::trim) {
        let field = SearchField::from_str(name)
            .ok()
            .filter(|field| QUOTE_SEARCH_FIELDS.contains(field))
            .ok_or_else(|| AppError::invalid_parameter("path"))?;

        if !fields.contains(&field) {
            fields.push(field);
        }
    }

    Ok(fields)
}
