use axum::{
    body::Body,
    extract::{Path, State},
    http::Response,
    routing::{get, patch},
    Router,
};
use axum_helpers::{AppError, ValidatedJson};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::client::{ForwardClient, NO_BODY};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateUserDto {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct PatchUserDto {
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

pub fn router(client: ForwardClient) -> Router {
    Router::new()
        .route("/", get(find_all).post(create))
        .route("/{id}", patch(update).get(find_one).delete(remove))
        .with_state(client)
}

async fn create(
    State(client): State<ForwardClient>,
    ValidatedJson(body): ValidatedJson<CreateUserDto>,
) -> Result<Response<Body>, AppError> {
    client
        .forward(Method::POST, "/users", None, &[], Some(&body))
        .await
}

async fn find_one(
    State(client): State<ForwardClient>,
    Path(id): Path<i64>,
) -> Result<Response<Body>, AppError> {
    client
        .forward(Method::GET, &format!("/users/{id}"), None, &[], NO_BODY)
        .await
}

async fn find_all(State(client): State<ForwardClient>) -> Result<Response<Body>, AppError> {
    client.forward(Method::GET, "/users", None, &[], NO_BODY).await
}

async fn remove(
    State(client): State<ForwardClient>,
    Path(id): Path<i64>,
) -> Result<Response<Body>, AppError> {
    client
        .forward(Method::DELETE, &format!("/users/{id}"), None, &[], NO_BODY)
        .await
}

async fn update(
    State(client): State<ForwardClient>,
    Path(id): Path<i64>,
    ValidatedJson(body): ValidatedJson<PatchUserDto>,
) -> Result<Response<Body>, AppError> {
    client
        .forward(
            Method::PATCH,
            &format!("/users/{id}"),
            None,
            &[],
            Some(&body),
        )
        .await
}
