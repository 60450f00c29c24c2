//! Request extractors whose rejections use the `{"errorMessage": ...}` body.

use crate::ApiError;
use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use domain::DomainError;
use serde::de::DeserializeOwned;

fn rejected(kind: &str, detail: String) -> ApiError {
    ApiError(DomainError::ValidationError(format!("{}: {}", kind, detail)))
}

/// `axum::Json` for request bodies.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| rejected("Invalid request body", rejection.body_text()))?;
        Ok(JsonBody(value))
    }
}

/// `axum::extract::Path` for numeric ids.
pub struct Path<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let axum::extract::Path(value) = axum::extract::Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| rejected("Invalid path parameter", rejection.body_text()))?;
        Ok(Path(value))
    }
}

/// `axum::extract::Query` for query strings.
pub struct Query<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let axum::extract::Query(value) =
            axum::extract::Query::<T>::from_request_parts(parts, state)
                .await
                .map_err(|rejection| rejected("Invalid query string", rejection.body_text()))?;
        Ok(Query(value))
    }
}
