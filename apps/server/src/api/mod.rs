//! API routes module
//!
//! Wires the four domain routers plus health and the OpenAPI document.

pub mod health;

use axum::{routing::get, Json, Router};
use domain_bookings::BookingService;
use domain_items::ItemService;
use domain_requests::RequestService;
use domain_users::UserService;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    let store = Arc::clone(&state.store);

    Router::new()
        .nest("/users", domain_users::handlers::router(UserService::new(Arc::clone(&store))))
        .nest("/items", domain_items::handlers::router(ItemService::new(Arc::clone(&store))))
        .nest(
            "/bookings",
            domain_bookings::handlers::router(BookingService::new(Arc::clone(&store))),
        )
        .nest(
            "/requests",
            domain_requests::handlers::router(RequestService::new(store)),
        )
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(health::router())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
