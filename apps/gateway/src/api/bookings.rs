use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::Response,
    routing::get,
    Router,
};
use axum_helpers::{AppError, SharerId, ValidatedJson};
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::page_query;
use crate::client::{ForwardClient, NO_BODY};

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookItemDto {
    pub item_id: i64,
    #[validate(custom(function = "not_in_past"))]
    pub start: DateTime<Utc>,
    #[validate(custom(function = "not_in_past"))]
    pub end: DateTime<Utc>,
}

fn not_in_past(instant: &DateTime<Utc>) -> Result<(), ValidationError> {
    if *instant < Utc::now() {
        return Err(ValidationError::new("in_the_past"));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    state: Option<String>,
    from: Option<i64>,
    size: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct DecisionQuery {
    approved: bool,
}

pub fn router(client: ForwardClient) -> Router {
    Router::new()
        .route("/", get(find_user_bookings).post(create))
        .route("/owner", get(find_owner_bookings))
        .route("/{bookingId}", get(find_one).patch(decide))
        .with_state(client)
}

async fn create(
    State(client): State<ForwardClient>,
    SharerId(booker_id): SharerId,
    ValidatedJson(body): ValidatedJson<BookItemDto>,
) -> Result<Response<Body>, AppError> {
    client
        .forward(Method::POST, "/bookings", Some(booker_id), &[], Some(&body))
        .await
}

async fn decide(
    State(client): State<ForwardClient>,
    SharerId(owner_id): SharerId,
    Path(booking_id): Path<i64>,
    Query(decision): Query<DecisionQuery>,
) -> Result<Response<Body>, AppError> {
    client
        .forward(
            Method::PATCH,
            &format!("/bookings/{booking_id}"),
            Some(owner_id),
            &[("approved", decision.approved.to_string())],
            NO_BODY,
        )
        .await
}

async fn find_one(
    State(client): State<ForwardClient>,
    SharerId(user_id): SharerId,
    Path(booking_id): Path<i64>,
) -> Result<Response<Body>, AppError> {
    client
        .forward(
            Method::GET,
            &format!("/bookings/{booking_id}"),
            Some(user_id),
            &[],
            NO_BODY,
        )
        .await
}

// The state value is forwarded verbatim; the server owns the unknown-state
// failure so the two surfaces cannot disagree on it.
fn list_query(params: ListQuery) -> Result<[(&'static str, String); 3], AppError> {
    let [from, size] = page_query(params.from, params.size)?;
    let state = params.state.unwrap_or_else(|| "ALL".to_string());
    Ok([("state", state), from, size])
}

async fn find_user_bookings(
    State(client): State<ForwardClient>,
    SharerId(user_id): SharerId,
    Query(params): Query<ListQuery>,
) -> Result<Response<Body>, AppError> {
    let query = list_query(params)?;
    client
        .forward(Method::GET, "/bookings", Some(user_id), &query, NO_BODY)
        .await
}

async fn find_owner_bookings(
    State(client): State<ForwardClient>,
    SharerId(owner_id): SharerId,
    Query(params): Query<ListQuery>,
) -> Result<Response<Body>, AppError> {
    let query = list_query(params)?;
    client
        .forward(
            Method::GET,
            "/bookings/owner",
            Some(owner_id),
            &query,
            NO_BODY,
        )
        .await
}
