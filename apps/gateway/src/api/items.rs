use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::Response,
    routing::{get, post},
    Json, Router,
};
use axum_helpers::{AppError, SharerId, ValidatedJson};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::page_query;
use crate::client::{ForwardClient, NO_BODY};

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemDto {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub available: bool,
    pub request_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateCommentDto {
    #[validate(length(min = 1))]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    from: Option<i64>,
    size: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    text: String,
    from: Option<i64>,
    size: Option<i64>,
}

pub fn router(client: ForwardClient) -> Router {
    Router::new()
        .route("/", get(find_user_items).post(create))
        .route("/search", get(search))
        .route("/{itemId}", get(find_one).patch(update))
        .route("/{itemId}/comment", post(comment))
        .with_state(client)
}

async fn create(
    State(client): State<ForwardClient>,
    SharerId(owner_id): SharerId,
    ValidatedJson(body): ValidatedJson<CreateItemDto>,
) -> Result<Response<Body>, AppError> {
    client
        .forward(Method::POST, "/items", Some(owner_id), &[], Some(&body))
        .await
}

async fn find_one(
    State(client): State<ForwardClient>,
    SharerId(user_id): SharerId,
    Path(item_id): Path<i64>,
) -> Result<Response<Body>, AppError> {
    client
        .forward(
            Method::GET,
            &format!("/items/{item_id}"),
            Some(user_id),
            &[],
            NO_BODY,
        )
        .await
}

async fn find_user_items(
    State(client): State<ForwardClient>,
    SharerId(owner_id): SharerId,
    Query(params): Query<PageQuery>,
) -> Result<Response<Body>, AppError> {
    let query = page_query(params.from, params.size)?;
    client
        .forward(Method::GET, "/items", Some(owner_id), &query, NO_BODY)
        .await
}

// Patches are forwarded untouched; the partial-merge semantics live in the
// server and validating here would reject legitimately absent fields.
async fn update(
    State(client): State<ForwardClient>,
    SharerId(owner_id): SharerId,
    Path(item_id): Path<i64>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response<Body>, AppError> {
    client
        .forward(
            Method::PATCH,
            &format!("/items/{item_id}"),
            Some(owner_id),
            &[],
            Some(&body),
        )
        .await
}

async fn search(
    State(client): State<ForwardClient>,
    Query(params): Query<SearchQuery>,
) -> Result<Response<Body>, AppError> {
    let [from, size] = page_query(params.from, params.size)?;
    let query = [("text", params.text), from, size];
    client
        .forward(Method::GET, "/items/search", None, &query, NO_BODY)
        .await
}

async fn comment(
    State(client): State<ForwardClient>,
    SharerId(user_id): SharerId,
    Path(item_id): Path<i64>,
    ValidatedJson(body): ValidatedJson<CreateCommentDto>,
) -> Result<Response<Body>, AppError> {
    client
        .forward(
            Method::POST,
            &format!("/items/{item_id}/comment"),
            Some(user_id),
            &[],
            Some(&body),
        )
        .await
}
