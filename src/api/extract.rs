use crate::compiler::RawParams;
use crate::error::AppError;
use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};

/// Query string parameters, rejected with the API's JSON error envelope
#[derive(Debug, Clone, Default)]
pub struct Params(pub RawParams);

#[async_trait]
impl<S> FromRequestParts<S> for Params
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<RawParams>::from_request_parts(parts, state).await?;
        Ok(Params(params))
    }
}
