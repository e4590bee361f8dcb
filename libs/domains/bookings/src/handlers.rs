use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use axum_helpers::{ErrorResponse, PageParams, SharerId};
use serde::Deserialize;
use std::sync::Arc;
use storage::Store;
use utoipa::{IntoParams, OpenApi};

use crate::error::BookingResult;
use crate::models::{BookingResponse, BookingState, CreateBooking, ItemSummary, UserSummary};
use crate::service::BookingService;

/// OpenAPI documentation for the Bookings API
#[derive(OpenApi)]
#[openapi(
    paths(add_booking, approve_booking, find_booking, find_user_bookings, find_owner_bookings),
    components(schemas(
        CreateBooking,
        BookingResponse,
        UserSummary,
        ItemSummary,
        ErrorResponse
    )),
    tags(
        (name = "Bookings", description = "Booking lifecycle and listings")
    )
)]
pub struct ApiDoc;

/// Create the bookings router with all HTTP endpoints
pub fn router<S: Store + 'static>(service: BookingService<S>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(find_user_bookings).post(add_booking))
        .route("/owner", get(find_owner_bookings))
        .route(
            "/{bookingId}",
            get(find_booking).patch(approve_booking),
        )
        .with_state(shared_service)
}

#[derive(Debug, Deserialize, IntoParams)]
struct StateQuery {
    /// Listing filter; defaults to ALL
    state: Option<String>,
}

impl StateQuery {
    fn parse(&self) -> BookingResult<BookingState> {
        match &self.state {
            Some(state) => BookingState::parse(state),
            None => Ok(BookingState::All),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
struct DecisionQuery {
    approved: bool,
}

/// Request a booking of an item
#[utoipa::path(
    post,
    path = "",
    tag = "Bookings",
    request_body = CreateBooking,
    params(("X-Sharer-User-Id" = i64, Header, description = "Booker id")),
    responses(
        (status = 200, description = "Booking created in WAITING", body = BookingResponse),
        (status = 400, description = "Item unavailable or bad time window", body = ErrorResponse),
        (status = 404, description = "Item, booker missing, or own item", body = ErrorResponse)
    )
)]
async fn add_booking<S: Store>(
    State(service): State<Arc<BookingService<S>>>,
    SharerId(booker_id): SharerId,
    Json(input): Json<CreateBooking>,
) -> BookingResult<Json<BookingResponse>> {
    let booking = service.add_booking(booker_id, input).await?;
    Ok(Json(booking))
}

/// Approve or reject a waiting booking
#[utoipa::path(
    patch,
    path = "/{bookingId}",
    tag = "Bookings",
    params(
        ("bookingId" = i64, Path, description = "Booking id"),
        DecisionQuery,
        ("X-Sharer-User-Id" = i64, Header, description = "Item owner id")
    ),
    responses(
        (status = 200, description = "Booking decided", body = BookingResponse),
        (status = 400, description = "Already approved", body = ErrorResponse),
        (status = 404, description = "Booking missing or caller not the owner", body = ErrorResponse)
    )
)]
async fn approve_booking<S: Store>(
    State(service): State<Arc<BookingService<S>>>,
    SharerId(owner_id): SharerId,
    Path(booking_id): Path<i64>,
    Query(decision): Query<DecisionQuery>,
) -> BookingResult<Json<BookingResponse>> {
    let booking = service
        .approve(owner_id, booking_id, decision.approved)
        .await?;
    Ok(Json(booking))
}

/// Get one booking; visible to the booker and the item owner
#[utoipa::path(
    get,
    path = "/{bookingId}",
    tag = "Bookings",
    params(
        ("bookingId" = i64, Path, description = "Booking id"),
        ("X-Sharer-User-Id" = i64, Header, description = "Caller id")
    ),
    responses(
        (status = 200, description = "Booking found", body = BookingResponse),
        (status = 404, description = "Booking missing or not visible", body = ErrorResponse)
    )
)]
async fn find_booking<S: Store>(
    State(service): State<Arc<BookingService<S>>>,
    SharerId(user_id): SharerId,
    Path(booking_id): Path<i64>,
) -> BookingResult<Json<BookingResponse>> {
    let booking = service.get_booking(user_id, booking_id).await?;
    Ok(Json(booking))
}

/// List the calling user's bookings, newest start first
#[utoipa::path(
    get,
    path = "",
    tag = "Bookings",
    params(
        StateQuery,
        PageParams,
        ("X-Sharer-User-Id" = i64, Header, description = "Booker id")
    ),
    responses(
        (status = 200, description = "Bookings by the caller", body = Vec<BookingResponse>),
        (status = 400, description = "Invalid paging parameters", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Unknown state value", body = ErrorResponse)
    )
)]
async fn find_user_bookings<S: Store>(
    State(service): State<Arc<BookingService<S>>>,
    SharerId(user_id): SharerId,
    Query(state): Query<StateQuery>,
    Query(params): Query<PageParams>,
) -> BookingResult<Json<Vec<BookingResponse>>> {
    let bookings = service
        .get_user_bookings(user_id, state.parse()?, params)
        .await?;
    Ok(Json(bookings))
}

/// List bookings on the calling user's items, newest start first
#[utoipa::path(
    get,
    path = "/owner",
    tag = "Bookings",
    params(
        StateQuery,
        PageParams,
        ("X-Sharer-User-Id" = i64, Header, description = "Owner id")
    ),
    responses(
        (status = 200, description = "Bookings on the caller's items", body = Vec<BookingResponse>),
        (status = 400, description = "Invalid paging parameters", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Unknown state value", body = ErrorResponse)
    )
)]
async fn find_owner_bookings<S: Store>(
    State(service): State<Arc<BookingService<S>>>,
    SharerId(owner_id): SharerId,
    Query(state): Query<StateQuery>,
    Query(params): Query<PageParams>,
) -> BookingResult<Json<Vec<BookingResponse>>> {
    let bookings = service
        .get_owner_bookings(owner_id, state.parse()?, params)
        .await?;
    Ok(Json(bookings))
}
