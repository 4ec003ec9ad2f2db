//! Search request compiler and pagination engine
//!
//! Turns raw, untrusted query parameters into a well-formed request for the
//! [`SearchBackend`](crate::backend::SearchBackend) and shapes what comes back
//! into a paginated [`ResultEnvelope`].
//!
//! ```text
//!  raw params ──► params (clamp) ──┐
//!             └─► fields (validate)┤
//!                                  ├─► filter   (random pick)  ──► backend.sample
//!  query ──► normalize ────────────┴─► criteria (search mode)  ──► pagination ──► envelope
//!                                                                  (search ∥ count)
//! ```
//!
//! Everything in here is pure except [`compile_quote_filter`] (one point
//! lookup for `authorSlug`) and [`assemble_page`] (the search/count fan-out).

mod criteria;
mod fields;
mod filter;
mod normalize;
mod pagination;
mod params;

pub use criteria::{
    autocomplete_mode, build_author_search, build_quote_search, detect_exact_phrase,
    AuthorSearch, FuzzyOptions, QuoteSearch, SearchMode,
};
pub use fields::{
    parse_quote_fields, SearchField, AUTHOR_SEARCH_FIELDS, DEFAULT_QUOTE_FIELDS,
    QUOTE_SEARCH_FIELDS,
};
pub use filter::{compile_quote_filter, split_list, LengthRange, QuoteFilter};
pub use normalize::{folded_analyzer, normalize, tokenize, NormalizedQuery, FOLDED_TOKENIZER};
pub use pagination::{assemble_page, last_item_index, ResultEnvelope};
pub use params::{
    clamp_param, parse_bool, parse_number, resolve_pagination, resolve_slop, Bounds, Pagination,
    LENGTH_BOUNDS, LIMIT_BOUNDS, SKIP_BOUNDS, SLOP_BOUNDS,
};

use std::collections::HashMap;

/// Query parameters exactly as received
pub type RawParams = HashMap<String, String>;

/// Look up a parameter by name
pub(crate) fn param<'a>(params: &'a RawParams, name: &str) -> Option<&'a str> {
    params.get(name).map(String::as_str)
}
