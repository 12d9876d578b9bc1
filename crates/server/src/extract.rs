//! Request extractors.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serein_core::TaskError;

use crate::error::ApiError;

/// JSON body extractor that reports malformed payloads — bad syntax, wrong
/// types, unknown enum values like an invalid `status` or `priority` — as a
/// 400 validation error instead of axum's default 422.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError(TaskError::validation(rejection.body_text())))?;
        Ok(Self(value))
    }
}
