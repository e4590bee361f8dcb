use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, PageParamsError};
use storage::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("User with id {0} not found")]
    UserNotFound(i64),

    #[error("Request with id {0} not found")]
    RequestNotFound(i64),

    #[error("Request description must not be empty")]
    EmptyDescription,

    #[error(transparent)]
    Page(#[from] PageParamsError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type RequestResult<T> = Result<T, RequestError>;

impl From<RequestError> for AppError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::UserNotFound(_) | RequestError::RequestNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            RequestError::EmptyDescription => AppError::BadRequest(err.to_string()),
            RequestError::Page(e) => AppError::BadRequest(e.to_string()),
            RequestError::Store(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
