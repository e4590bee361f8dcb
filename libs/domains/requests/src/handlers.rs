use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use axum_helpers::{ErrorResponse, PageParams, SharerId};
use std::sync::Arc;
use storage::Store;
use utoipa::OpenApi;

use crate::error::RequestResult;
use crate::models::{CreateRequest, RequestDto};
use crate::service::RequestService;

/// OpenAPI documentation for the Requests API
#[derive(OpenApi)]
#[openapi(
    paths(add_request, find_own_requests, find_all_requests, find_request),
    components(schemas(CreateRequest, RequestDto, ErrorResponse)),
    tags(
        (name = "Requests", description = "Item requests and answering listings")
    )
)]
pub struct ApiDoc;

/// Create the requests router with all HTTP endpoints
pub fn router<S: Store + 'static>(service: RequestService<S>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(find_own_requests).post(add_request))
        .route("/all", get(find_all_requests))
        .route("/{requestId}", get(find_request))
        .with_state(shared_service)
}

/// Post a request for an item
#[utoipa::path(
    post,
    path = "",
    tag = "Requests",
    request_body = CreateRequest,
    params(("X-Sharer-User-Id" = i64, Header, description = "Requester id")),
    responses(
        (status = 200, description = "Request posted", body = RequestDto),
        (status = 400, description = "Empty description", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn add_request<S: Store>(
    State(service): State<Arc<RequestService<S>>>,
    SharerId(user_id): SharerId,
    Json(input): Json<CreateRequest>,
) -> RequestResult<Json<RequestDto>> {
    let request = service.add_request(user_id, input).await?;
    Ok(Json(request))
}

/// List the calling user's own requests, newest first
#[utoipa::path(
    get,
    path = "",
    tag = "Requests",
    params(("X-Sharer-User-Id" = i64, Header, description = "Requester id")),
    responses(
        (status = 200, description = "The caller's requests", body = Vec<RequestDto>),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn find_own_requests<S: Store>(
    State(service): State<Arc<RequestService<S>>>,
    SharerId(user_id): SharerId,
) -> RequestResult<Json<Vec<RequestDto>>> {
    let requests = service.get_own_requests(user_id).await?;
    Ok(Json(requests))
}

/// List other users' requests, newest first
#[utoipa::path(
    get,
    path = "/all",
    tag = "Requests",
    params(
        PageParams,
        ("X-Sharer-User-Id" = i64, Header, description = "Caller id")
    ),
    responses(
        (status = 200, description = "Requests posted by others", body = Vec<RequestDto>),
        (status = 400, description = "Invalid paging parameters", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn find_all_requests<S: Store>(
    State(service): State<Arc<RequestService<S>>>,
    SharerId(user_id): SharerId,
    Query(params): Query<PageParams>,
) -> RequestResult<Json<Vec<RequestDto>>> {
    let requests = service.get_requests(user_id, params).await?;
    Ok(Json(requests))
}

/// Get one request with its answering items
#[utoipa::path(
    get,
    path = "/{requestId}",
    tag = "Requests",
    params(
        ("requestId" = i64, Path, description = "Request id"),
        ("X-Sharer-User-Id" = i64, Header, description = "Caller id")
    ),
    responses(
        (status = 200, description = "Request found", body = RequestDto),
        (status = 404, description = "User or request not found", body = ErrorResponse)
    )
)]
async fn find_request<S: Store>(
    State(service): State<Arc<RequestService<S>>>,
    SharerId(user_id): SharerId,
    Path(request_id): Path<i64>,
) -> RequestResult<Json<RequestDto>> {
    let request = service.get_request_by_id(user_id, request_id).await?;
    Ok(Json(request))
}
