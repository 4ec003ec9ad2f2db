pub mod extract;
pub mod handlers;
pub mod routes;

pub use routes::*;

use crate::backend::SearchBackend;
use crate::service::QuoteService;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<QuoteService>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(service: Arc<QuoteService>) -> Self {
        Self {
            service,
            started_at: Instant::now(),
        }
    }

    /// State serving requests from `backend`
    pub fn from_backend(backend: Arc<dyn SearchBackend>) -> Self {
        Self::new(Arc::new(QuoteService::new(backend)))
    }
}
