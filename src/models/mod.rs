pub mod author;
pub mod quote;

pub use author::*;
pub use quote::*;

use crate::error::Result;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Read a JSON array of records from disk
fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let raw = std::fs::read_to_string(path)?;
    let records: Vec<T> = serde_json::from_str(&raw)?;
    Ok(records)
}

/// Load the quote collection from a JSON seed file
pub fn load_quotes(path: impl AsRef<Path>) -> Result<Vec<Quote>> {
    let path = path.as_ref();
    let quotes: Vec<Quote> = load_records(path)?;
    let quotes: Vec<Quote> = quotes.into_iter().map(Quote::with_computed_length).collect();

    tracing::info!(path = %path.display(), count = quotes.len(), "Loaded quotes");
    Ok(quotes)
}

/// Load the author collection from a JSON seed file
pub fn load_authors(path: impl AsRef<Path>) -> Result<Vec<Author>> {
    let path = path.as_ref();
    let authors: Vec<Author> = load_records(path)?;

    tracing::info!(path = %path.display(), count = authors.len(), "Loaded authors");
    Ok(authors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_quotes_fills_length() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"_id":"q1","content":"Stay hungry.","author":"Steve Jobs","authorSlug":"steve-jobs","authorId":"a1","tags":["life"]}}]"#
        )
        .unwrap();

        let quotes = load_quotes(file.path()).unwrap();
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].length, 12);
        assert_eq!(quotes[0].tags, vec!["life".to_string()]);
    }

    #[test]
    fn test_load_authors_missing_file() {
        let result = load_authors("/nonexistent/authors.json");
        assert!(matches!(result, Err(crate::error::AppError::Io(_))));
    }

    #[test]
    fn test_load_quotes_malformed() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let result = load_quotes(file.path());
        assert!(matches!(
            result,
            Err(crate::error::AppError::Serialization(_))
        ));
    }
}
