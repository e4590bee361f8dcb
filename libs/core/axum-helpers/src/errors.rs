//! Error kinds shared by every domain and their wire representation.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Wire format for every error response: `{ "error": "<message>" }`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

/// The three error kinds of the API, plus an internal catch-all.
///
/// `NotFound` also covers authorization-by-ownership failures (a non-owner
/// approving a booking, a stranger fetching one); the API deliberately does
/// not distinguish "absent" from "not yours". `Validation` maps to 500:
/// uniqueness conflicts and unknown enum values surface as server errors on
/// this wire contract, and clients depend on that.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        match &self {
            AppError::Internal(_) | AppError::Validation(_) => {
                tracing::error!(%status, "{}", message);
            }
            _ => tracing::warn!(%status, "{}", message),
        }
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
