//! Custom extractors: the caller-identity header and validated JSON bodies.

use axum::{
    extract::{FromRequest, FromRequestParts, Json, Request},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::AppError;

/// Header carrying the caller's user id.
///
/// There is no authentication: identity is client-asserted, which is this
/// API's trust model.
pub const SHARER_USER_ID_HEADER: &str = "X-Sharer-User-Id";

/// Extractor for the `X-Sharer-User-Id` header.
///
/// Missing or non-numeric headers are rejected with 400 before the handler
/// runs.
#[derive(Debug, Clone, Copy)]
pub struct SharerId(pub i64);

impl<S> FromRequestParts<S> for SharerId
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts.headers.get(SHARER_USER_ID_HEADER).ok_or_else(|| {
            AppError::BadRequest(format!("Missing {SHARER_USER_ID_HEADER} header"))
                .into_response()
        })?;

        value
            .to_str()
            .ok()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .map(SharerId)
            .ok_or_else(|| {
                AppError::BadRequest(format!(
                    "{SHARER_USER_ID_HEADER} header must be a numeric user id"
                ))
                .into_response()
            })
    }
}

/// JSON extractor that runs `validator` checks on the body.
///
/// Both deserialization failures and validation failures are rejected with
/// 400 and the `{ "error": ... }` payload.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()).into_response())?;

        data.validate().map_err(|e| {
            let fields: Vec<String> = e.field_errors().keys().map(|k| k.to_string()).collect();
            AppError::BadRequest(format!("Validation failed for: {}", fields.join(", ")))
                .into_response()
        })?;

        Ok(ValidatedJson(data))
    }
}
