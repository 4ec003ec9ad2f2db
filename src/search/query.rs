//! Translation of compiled criteria into Tantivy queries

use crate::backend::ExactMatch;
use crate::compiler::{tokenize, FuzzyOptions, QuoteFilter, SearchField, SearchMode};
use crate::search::error::{SearchError, SearchResult};
use std::collections::BTreeSet;
use std::ops::Bound;
use tantivy::query::{
    AllQuery, BooleanQuery, EmptyQuery, Occur, PhraseQuery, Query, RangeQuery, RegexQuery,
    TermQuery, TermSetQuery,
};
use tantivy::schema::{Field, IndexRecordOption, Schema};
use tantivy::Term;

/// Query builder for one index
pub struct QueryBuilder<'a> {
    schema: &'a Schema,
}

impl<'a> QueryBuilder<'a> {
    /// Create a new query builder
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    fn field(&self, name: &str) -> SearchResult<Field> {
        self.schema
            .get_field(name)
            .map_err(|_| SearchError::QueryBuildFailed(format!("Unknown field `{}`", name)))
    }

    fn fields(&self, fields: &[SearchField]) -> SearchResult<Vec<Field>> {
        fields.iter().map(|f| self.field(f.as_ref())).collect()
    }

    /// Build a Tantivy query from compiled search criteria
    pub fn build(&self, mode: &SearchMode) -> SearchResult<Box<dyn Query>> {
        match mode {
            SearchMode::ExactPhrase { text, fields, slop } => {
                let words = tokenize(text);
                let clauses = self
                    .fields(fields)?
                    .into_iter()
                    .map(|field| (Occur::Should, phrase_query(field, &words, *slop)))
                    .collect();
                Ok(combine(clauses))
            }
            SearchMode::FullText { text, fields } => {
                let words = tokenize(text);
                let mut clauses: Vec<(Occur, Box<dyn Query>)> = Vec::new();
                for &field in &self.fields(fields)? {
                    for word in &words {
                        let term = Term::from_field_text(field, word);
                        clauses.push((
                            Occur::Should,
                            Box::new(TermQuery::new(term, IndexRecordOption::WithFreqs)),
                        ));
                    }
                }
                Ok(combine(clauses))
            }
            SearchMode::AutocompleteCompound {
                fields,
                complete_terms,
                prefix_term,
                fuzzy,
            } => {
                let fields = self.fields(fields)?;
                let mut clauses: Vec<(Occur, Box<dyn Query>)> = Vec::new();

                if let Some(prefix) = prefix_term {
                    let mut prefix_clauses = Vec::new();
                    for word in tokenize(prefix) {
                        for &field in &fields {
                            prefix_clauses.push((Occur::Should, prefix_query(field, &word)?));
                        }
                    }
                    clauses.push((Occur::Must, combine(prefix_clauses)));
                }

                if !complete_terms.is_empty() {
                    let mut fuzzy_clauses = Vec::new();
                    for word in complete_terms.iter().flat_map(|term| tokenize(term)) {
                        for &field in &fields {
                            fuzzy_clauses.push((Occur::Should, fuzzy_query(field, &word, fuzzy)?));
                        }
                    }
                    clauses.push((Occur::Must, combine(fuzzy_clauses)));
                }

                Ok(combine(clauses))
            }
        }
    }

    /// Build the attribute filter used for random sampling
    pub fn build_filter(&self, filter: &QuoteFilter) -> SearchResult<Box<dyn Query>> {
        if filter.is_unrestricted() {
            return Ok(Box::new(AllQuery));
        }

        let mut subqueries: Vec<(Occur, Box<dyn Query>)> = Vec::new();

        if let Some(range) = &filter.length {
            let lower = range.min.map_or(Bound::Unbounded, Bound::Included);
            let upper = range.max.map_or(Bound::Unbounded, Bound::Included);
            subqueries.push((
                Occur::Must,
                Box::new(RangeQuery::new_u64_bounds("length".to_string(), lower, upper)),
            ));
        }

        if let Some(tags) = &filter.tags {
            subqueries.push((Occur::Must, self.term_set("tag_key", tags.iter())?));
        }

        if let Some(ids) = &filter.author_ids {
            subqueries.push((Occur::Must, self.term_set("author_id", ids.iter())?));
        }

        if let Some(names) = &filter.authors {
            subqueries.push((Occur::Must, self.term_set("author_name", names.iter())?));
        }

        Ok(combine(subqueries))
    }

    /// Build a single-field equality query
    pub fn build_exact(&self, filter: &ExactMatch) -> SearchResult<Box<dyn Query>> {
        let name = match filter.field.as_str() {
            "_id" => "id",
            other => other,
        };
        let term = Term::from_field_text(self.field(name)?, &filter.value);
        Ok(Box::new(TermQuery::new(term, IndexRecordOption::Basic)))
    }

    fn term_set<'v>(
        &self,
        name: &str,
        values: impl Iterator<Item = &'v String>,
    ) -> SearchResult<Box<dyn Query>> {
        let field = self.field(name)?;
        let terms: Vec<Term> = values
            .map(|value| Term::from_field_text(field, value))
            .collect();
        Ok(Box::new(TermSetQuery::new(terms)))
    }
}

fn phrase_query(field: Field, words: &[String], slop: u32) -> Box<dyn Query> {
    let terms: Vec<Term> = words
        .iter()
        .map(|word| Term::from_field_text(field, word))
        .collect();

    match terms.len() {
        0 => Box::new(EmptyQuery),
        1 => Box::new(TermQuery::new(
            terms[0].clone(),
            IndexRecordOption::WithFreqs,
        )),
        _ => {
            let mut phrase = PhraseQuery::new(terms);
            phrase.set_slop(slop);
            Box::new(phrase)
        }
    }
}

/// Any indexed word starting with `word`
fn prefix_query(field: Field, word: &str) -> SearchResult<Box<dyn Query>> {
    let pattern = format!("{}.*", regex::escape(word));
    let query = RegexQuery::from_pattern(&pattern, field)
        .map_err(|e| SearchError::QueryBuildFailed(format!("Invalid prefix `{}`: {}", word, e)))?;
    Ok(Box::new(query))
}

/// A word within `max_edits` of `word` whose first `prefix_length`
/// characters are unchanged. Both conditions hold for the same indexed word.
fn fuzzy_query(field: Field, word: &str, options: &FuzzyOptions) -> SearchResult<Box<dyn Query>> {
    let head: String = word.chars().take(options.prefix_length).collect();
    let rest: Vec<char> = word.chars().skip(options.prefix_length).collect();

    let tail = match options.max_edits {
        0 => literal(&rest),
        1 => one_edit_alternation(&rest),
        n => {
            return Err(SearchError::QueryBuildFailed(format!(
                "Fuzzy matching supports at most one edit, got {}",
                n
            )))
        }
    };

    let pattern = format!("{}{}", regex::escape(&head), tail);
    let query = RegexQuery::from_pattern(&pattern, field)
        .map_err(|e| SearchError::QueryBuildFailed(format!("Invalid fuzzy term `{}`: {}", word, e)))?;
    Ok(Box::new(query))
}

fn literal(chars: &[char]) -> String {
    regex::escape(&chars.iter().collect::<String>())
}

/// Regex matching `chars` or anything one insertion, deletion, substitution
/// or adjacent transposition away from it
fn one_edit_alternation(chars: &[char]) -> String {
    let mut variants = BTreeSet::new();
    variants.insert(literal(chars));

    for i in 0..=chars.len() {
        variants.insert(format!("{}.{}", literal(&chars[..i]), literal(&chars[i..])));

        if i < chars.len() {
            variants.insert(format!("{}{}", literal(&chars[..i]), literal(&chars[i + 1..])));
            variants.insert(format!("{}.{}", literal(&chars[..i]), literal(&chars[i + 1..])));
        }

        if i + 1 < chars.len() {
            let mut swapped = chars.to_vec();
            swapped.swap(i, i + 1);
            variants.insert(literal(&swapped));
        }
    }

    // deleting the only remaining character leaves the head alone
    let optional = variants.remove("");
    let body = variants.into_iter().collect::<Vec<_>>().join("|");
    format!("(?:{}){}", body, if optional { "?" } else { "" })
}

/// Collapse clauses into one query. No clauses matches nothing.
fn combine(mut clauses: Vec<(Occur, Box<dyn Query>)>) -> Box<dyn Query> {
    match clauses.len() {
        0 => Box::new(EmptyQuery),
        1 if clauses[0].0 != Occur::MustNot => clauses.remove(0).1,
        _ => Box::new(BooleanQuery::new(clauses)),
    }
}
