//! Gateway routes: shape validation in front, forwarding behind.
//!
//! Every route parses and validates what the client sent, then hands the
//! request to the server unchanged. Business rules live server-side only.

pub mod bookings;
pub mod items;
pub mod requests;
pub mod users;

use axum::Router;
use axum_helpers::{AppError, PageParamsError};

use crate::client::ForwardClient;

/// Create all gateway routes
pub fn routes(client: ForwardClient) -> Router {
    Router::new()
        .nest("/users", users::router(client.clone()))
        .nest("/items", items::router(client.clone()))
        .nest("/bookings", bookings::router(client.clone()))
        .nest("/requests", requests::router(client))
}

/// Apply the gateway-side paging defaults (`from=0`, `size=10`) and reject
/// out-of-range values before the server sees them.
pub(crate) fn page_query(
    from: Option<i64>,
    size: Option<i64>,
) -> Result<[(&'static str, String); 2], AppError> {
    let from = from.unwrap_or(0);
    let size = size.unwrap_or(10);
    if from < 0 || size < 1 {
        return Err(AppError::BadRequest(PageParamsError.to_string()));
    }
    Ok([("from", from.to_string()), ("size", size.to_string())])
}
