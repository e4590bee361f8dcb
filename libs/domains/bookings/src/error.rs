use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, PageParamsError};
use storage::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Booking with id {0} not found")]
    BookingNotFound(i64),

    #[error("User with id {0} not found")]
    UserNotFound(i64),

    #[error("Item with id {0} not found")]
    ItemNotFound(i64),

    // The next three are ownership failures; the wire keeps them as 404.
    #[error("Owner cannot book their own item")]
    OwnItem,

    #[error("Only the item owner can decide on booking {0}")]
    NotOwner(i64),

    #[error("Booking with id {0} is not visible to this user")]
    NotParticipant(i64),

    #[error("Item with id {0} is not available for booking")]
    Unavailable(i64),

    #[error("Booking start must not be in the past")]
    StartInPast,

    #[error("Booking end must not be in the past")]
    EndInPast,

    #[error("Booking start must precede its end")]
    StartNotBeforeEnd,

    #[error("Booking with id {0} is already approved")]
    AlreadyApproved(i64),

    #[error("Unknown state: {0}")]
    UnknownState(String),

    #[error(transparent)]
    Page(#[from] PageParamsError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type BookingResult<T> = Result<T, BookingError>;

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::BookingNotFound(_)
            | BookingError::UserNotFound(_)
            | BookingError::ItemNotFound(_)
            | BookingError::OwnItem
            | BookingError::NotOwner(_)
            | BookingError::NotParticipant(_) => AppError::NotFound(err.to_string()),
            BookingError::Unavailable(_)
            | BookingError::StartInPast
            | BookingError::EndInPast
            | BookingError::StartNotBeforeEnd
            | BookingError::AlreadyApproved(_) => AppError::BadRequest(err.to_string()),
            BookingError::UnknownState(_) => AppError::Validation(err.to_string()),
            BookingError::Page(e) => AppError::BadRequest(e.to_string()),
            BookingError::Store(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
