//! Quotable Search
//!
//! A read-only quotations API: random quotes with attribute filters, quote
//! search (full text or exact phrase) and author-name autocomplete.
//!
//! Requests are compiled by [`compiler`] into backend-neutral criteria,
//! executed by a [`backend::SearchBackend`] (the Tantivy adapter lives in
//! [`search`]) and served over HTTP by [`api`].

pub mod api;
pub mod backend;
pub mod compiler;
pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod service;

pub use error::{AppError, Result};
