use crate::api::extract::Params;
use crate::api::AppState;
use crate::backend::Document;
use crate::compiler::ResultEnvelope;
use crate::error::Result;
use axum::{extract::State, Json};
use serde::Serialize;

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

/// A random quote, optionally filtered
pub async fn random_quote(
    State(state): State<AppState>,
    Params(params): Params,
) -> Result<Json<Document>> {
    let quote = state.service.random_quote(&params).await?;
    Ok(Json(quote))
}

/// Search quotes by content, author or tags
pub async fn search_quotes(
    State(state): State<AppState>,
    Params(params): Params,
) -> Result<Json<ResultEnvelope>> {
    let page = state.service.search_quotes(&params).await?;
    Ok(Json(page))
}

/// Autocomplete search over author names
pub async fn search_authors(
    State(state): State<AppState>,
    Params(params): Params,
) -> Result<Json<ResultEnvelope>> {
    let page = state.service.search_authors(&params).await?;
    Ok(Json(page))
}
