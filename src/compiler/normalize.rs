//! Query text normalization
//!
//! Queries are split with the same analyzer the search indexes use, so a
//! query token and an indexed token for the same word are always identical.

use tantivy::tokenizer::{AsciiFoldingFilter, LowerCaser, SimpleTokenizer, TextAnalyzer, TokenStream};

/// Name the analyzer is registered under on every index
pub const FOLDED_TOKENIZER: &str = "folded";

/// Words split on non-alphanumerics, lower-cased, diacritics folded
pub fn folded_analyzer() -> TextAnalyzer {
    TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(LowerCaser)
        .filter(AsciiFoldingFilter)
        .build()
}

/// A query after lower-casing and word tokenization
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedQuery {
    /// Tokens joined by single spaces
    pub text: String,

    /// Word tokens in the order they were typed
    pub tokens: Vec<String>,

    /// Whether the raw input ended in whitespace
    pub trailing_whitespace: bool,
}

impl NormalizedQuery {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Split text into folded word tokens, discarding punctuation
pub fn tokenize(text: &str) -> Vec<String> {
    let mut analyzer = folded_analyzer();
    let mut stream = analyzer.token_stream(text);
    let mut tokens = Vec::new();
    while stream.advance() {
        tokens.push(stream.token().text.clone());
    }
    tokens
}

/// Normalize a raw query; a missing query is the empty string
pub fn normalize(raw: Option<&str>) -> NormalizedQuery {
    let raw = raw.unwrap_or_default();
    let tokens = tokenize(raw);

    NormalizedQuery {
        text: tokens.join(" "),
        trailing_whitespace: raw.chars().last().is_some_and(char::is_whitespace),
        tokens,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_drops_punctuation() {
        assert_eq!(
            tokenize("Hello, World! How are you?"),
            vec!["hello", "world", "how", "are", "you"]
        );
    }

    #[test]
    fn test_tokenize_keeps_digits_and_short_words() {
        assert_eq!(tokenize("Catch-22 is a book"), vec!["catch", "22", "is", "a", "book"]);
    }

    #[test]
    fn test_tokenize_preserves_order_and_duplicates() {
        assert_eq!(tokenize("b a b"), vec!["b", "a", "b"]);
    }

    #[test]
    fn test_tokenize_strips_diacritics() {
        assert_eq!(tokenize("Émile Zola"), vec!["emile", "zola"]);
        assert_eq!(tokenize("Gabriel García-Márquez"), vec!["gabriel", "garcia", "marquez"]);
    }

    #[test]
    fn test_tokenize_keeps_non_latin_letters() {
        assert_eq!(tokenize("Лев Толстой"), vec!["лев", "толстой"]);

        // Devanagari vowel signs stay on the word they belong to
        let tokens = tokenize("प्रेमचंद");
        assert!(!tokens.is_empty());
        assert!(tokens.iter().any(|t| t.contains('े')));
    }

    #[test]
    fn test_normalize_missing_query() {
        let query = normalize(None);
        assert!(query.is_empty());
        assert_eq!(query.text, "");
        assert!(!query.trailing_whitespace);
    }

    #[test]
    fn test_normalize_trailing_whitespace() {
        assert!(normalize(Some("friendship ")).trailing_whitespace);
        assert!(normalize(Some("friendship\t")).trailing_whitespace);
        assert!(!normalize(Some("friendship quotes")).trailing_whitespace);
    }

    #[test]
    fn test_normalize_text_is_joined_tokens() {
        let query = normalize(Some("  To be,  or NOT to be. "));
        assert_eq!(query.text, "to be or not to be");
        assert_eq!(query.tokens.len(), 6);
    }

    #[test]
    fn test_normalize_punctuation_only() {
        assert!(normalize(Some("?!...")).is_empty());
    }
}
