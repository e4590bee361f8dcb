use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use storage::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User with id {0} not found")]
    NotFoundById(i64),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFoundById(_) => AppError::NotFound(err.to_string()),
            // Uniqueness conflicts are validation errors on this wire
            // contract; anything else from the store is unexpected.
            UserError::Store(StoreError::EmailTaken) => {
                AppError::Validation(StoreError::EmailTaken.to_string())
            }
            UserError::Store(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
