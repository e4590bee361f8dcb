use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, PageParamsError};
use storage::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("User with id {0} not found")]
    UserNotFound(i64),

    #[error("Item with id {0} not found")]
    ItemNotFound(i64),

    // Ownership failures reuse the not-found kind on the wire.
    #[error("Item with id {0} does not belong to user {1}")]
    NotOwner(i64, i64),

    #[error("Comment text must not be empty")]
    EmptyComment,

    #[error("User with id {0} has not yet completed a booking of item {1}")]
    CommentNotAllowed(i64, i64),

    #[error(transparent)]
    Page(#[from] PageParamsError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ItemResult<T> = Result<T, ItemError>;

impl From<ItemError> for AppError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::UserNotFound(_)
            | ItemError::ItemNotFound(_)
            | ItemError::NotOwner(_, _) => AppError::NotFound(err.to_string()),
            ItemError::EmptyComment | ItemError::CommentNotAllowed(_, _) => {
                AppError::BadRequest(err.to_string())
            }
            ItemError::Page(e) => AppError::BadRequest(e.to_string()),
            ItemError::Store(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
