use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
    Json, Router,
};
use axum_helpers::ErrorResponse;
use std::sync::Arc;
use storage::{Store, User};
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{CreateUser, UserPatch};
use crate::service::UserService;

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(add_user, find_user, find_all_users, remove_user, update_user),
    components(schemas(User, CreateUser, UserPatch, ErrorResponse)),
    tags(
        (name = "Users", description = "User registration and maintenance")
    )
)]
pub struct ApiDoc;

/// Create the users router with all HTTP endpoints
pub fn router<S: Store + 'static>(service: UserService<S>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(find_all_users).post(add_user))
        .route(
            "/{id}",
            patch(update_user).get(find_user).delete(remove_user),
        )
        .with_state(shared_service)
}

/// Register a new user
#[utoipa::path(
    post,
    path = "",
    tag = "Users",
    request_body = CreateUser,
    responses(
        (status = 200, description = "User registered", body = User),
        (status = 500, description = "Email already registered", body = ErrorResponse)
    )
)]
async fn add_user<S: Store>(
    State(service): State<Arc<UserService<S>>>,
    Json(input): Json<CreateUser>,
) -> UserResult<Json<User>> {
    let user = service.add_user(input).await?;
    Ok(Json(user))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn find_user<S: Store>(
    State(service): State<Arc<UserService<S>>>,
    Path(id): Path<i64>,
) -> UserResult<Json<User>> {
    let user = service.find_by_id(id).await?;
    Ok(Json(user))
}

/// List all users
#[utoipa::path(
    get,
    path = "",
    tag = "Users",
    responses(
        (status = 200, description = "All registered users", body = Vec<User>)
    )
)]
async fn find_all_users<S: Store>(
    State(service): State<Arc<UserService<S>>>,
) -> UserResult<Json<Vec<User>>> {
    let users = service.find_all().await?;
    Ok(Json(users))
}

/// Delete a user by id
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn remove_user<S: Store>(
    State(service): State<Arc<UserService<S>>>,
    Path(id): Path<i64>,
) -> UserResult<impl IntoResponse> {
    service.remove_by_id(id).await?;
    Ok(StatusCode::OK)
}

/// Partially update a user
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    request_body = UserPatch,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Email already registered", body = ErrorResponse)
    )
)]
async fn update_user<S: Store>(
    State(service): State<Arc<UserService<S>>>,
    Path(id): Path<i64>,
    Json(patch): Json<UserPatch>,
) -> UserResult<Json<User>> {
    let user = service.update_user(id, patch).await?;
    Ok(Json(user))
}
