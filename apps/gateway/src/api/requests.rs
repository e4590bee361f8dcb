use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::Response,
    routing::get,
    Router,
};
use axum_helpers::{AppError, SharerId, ValidatedJson};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::page_query;
use crate::client::{ForwardClient, NO_BODY};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateRequestDto {
    #[validate(length(min = 1))]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    from: Option<i64>,
    size: Option<i64>,
}

pub fn router(client: ForwardClient) -> Router {
    Router::new()
        .route("/", get(find_own).post(create))
        .route("/all", get(find_all))
        .route("/{requestId}", get(find_one))
        .with_state(client)
}

async fn create(
    State(client): State<ForwardClient>,
    SharerId(user_id): SharerId,
    ValidatedJson(body): ValidatedJson<CreateRequestDto>,
) -> Result<Response<Body>, AppError> {
    client
        .forward(Method::POST, "/requests", Some(user_id), &[], Some(&body))
        .await
}

async fn find_own(
    State(client): State<ForwardClient>,
    SharerId(user_id): SharerId,
) -> Result<Response<Body>, AppError> {
    client
        .forward(Method::GET, "/requests", Some(user_id), &[], NO_BODY)
        .await
}

async fn find_all(
    State(client): State<ForwardClient>,
    SharerId(user_id): SharerId,
    Query(params): Query<PageQuery>,
) -> Result<Response<Body>, AppError> {
    let query = page_query(params.from, params.size)?;
    client
        .forward(Method::GET, "/requests/all", Some(user_id), &query, NO_BODY)
        .await
}

async fn find_one(
    State(client): State<ForwardClient>,
    SharerId(user_id): SharerId,
    Path(request_id): Path<i64>,
) -> Result<Response<Body>, AppError> {
    client
        .forward(
            Method::GET,
            &format!("/requests/{request_id}"),
            Some(user_id),
            &[],
            NO_BODY,
        )
        .await
}
