//! Request extractors.

use axum::extract::{FromRequest, OptionalFromRequest, Request};
use serde::de::DeserializeOwned;

use super::error::ApiErrorResponse;

/// JSON request body whose rejections render as [`ApiErrorResponse`] (400).
///
/// Wraps `axum::Json` so that malformed bodies, missing content types and
/// type mismatches share the service's error shape instead of axum's
/// plain-text 415/422 responses.
///
/// Taken as `Option<JsonBody<T>>`, a request without a JSON content type
/// yields `None` instead of a rejection.
#[derive(Debug, Clone, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiErrorResponse))]
pub struct JsonBody<T>(pub T);

impl<T, S> OptionalFromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiErrorResponse;

    async fn from_request(request: Request, state: &S) -> Result<Option<Self>, Self::Rejection> {
        let json = <axum::Json<T> as OptionalFromRequest<S>>::from_request(request, state).await?;
        Ok(json.map(|axum::Json(value)| Self(value)))
    }
}
