use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use axum_helpers::{ErrorResponse, PageParams, SharerId};
use serde::Deserialize;
use std::sync::Arc;
use storage::{Item, Store};
use utoipa::{IntoParams, OpenApi};

use crate::error::ItemResult;
use crate::models::{
    BookingBrief, CommentDto, CreateComment, CreateItem, ItemPatch, ItemWithBookings,
};
use crate::service::ItemService;

/// OpenAPI documentation for the Items API
#[derive(OpenApi)]
#[openapi(
    paths(add_item, find_item, find_user_items, update_item, search_items, add_comment),
    components(schemas(
        Item,
        CreateItem,
        ItemPatch,
        ItemWithBookings,
        BookingBrief,
        CreateComment,
        CommentDto,
        ErrorResponse
    )),
    tags(
        (name = "Items", description = "Item listings, search and comments")
    )
)]
pub struct ApiDoc;

/// Create the items router with all HTTP endpoints
pub fn router<S: Store + 'static>(service: ItemService<S>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(find_user_items).post(add_item))
        .route("/search", get(search_items))
        .route("/{itemId}", get(find_item).patch(update_item))
        .route("/{itemId}/comment", post(add_comment))
        .with_state(shared_service)
}

#[derive(Debug, Deserialize, IntoParams)]
struct SearchText {
    text: String,
}

/// List a new item owned by the calling user
#[utoipa::path(
    post,
    path = "",
    tag = "Items",
    request_body = CreateItem,
    params(("X-Sharer-User-Id" = i64, Header, description = "Owner id")),
    responses(
        (status = 200, description = "Item listed", body = Item),
        (status = 404, description = "Owner not found", body = ErrorResponse)
    )
)]
async fn add_item<S: Store>(
    State(service): State<Arc<ItemService<S>>>,
    SharerId(owner_id): SharerId,
    Json(input): Json<CreateItem>,
) -> ItemResult<Json<Item>> {
    let item = service.add_item(owner_id, input).await?;
    Ok(Json(item))
}

/// Get one item with comments and, for the owner, adjacent bookings
#[utoipa::path(
    get,
    path = "/{itemId}",
    tag = "Items",
    params(
        ("itemId" = i64, Path, description = "Item id"),
        ("X-Sharer-User-Id" = i64, Header, description = "Viewer id")
    ),
    responses(
        (status = 200, description = "Item found", body = ItemWithBookings),
        (status = 404, description = "User or item not found", body = ErrorResponse)
    )
)]
async fn find_item<S: Store>(
    State(service): State<Arc<ItemService<S>>>,
    SharerId(user_id): SharerId,
    Path(item_id): Path<i64>,
) -> ItemResult<Json<ItemWithBookings>> {
    let item = service.find_item_by_id(user_id, item_id).await?;
    Ok(Json(item))
}

/// List the calling user's items with their booking view
#[utoipa::path(
    get,
    path = "",
    tag = "Items",
    params(
        PageParams,
        ("X-Sharer-User-Id" = i64, Header, description = "Owner id")
    ),
    responses(
        (status = 200, description = "Owner's items, ascending by id", body = Vec<ItemWithBookings>),
        (status = 400, description = "Invalid paging parameters", body = ErrorResponse)
    )
)]
async fn find_user_items<S: Store>(
    State(service): State<Arc<ItemService<S>>>,
    SharerId(owner_id): SharerId,
    Query(params): Query<PageParams>,
) -> ItemResult<Json<Vec<ItemWithBookings>>> {
    let items = service.find_all_user_items(owner_id, params).await?;
    Ok(Json(items))
}

/// Edit an item; only the owner may edit
#[utoipa::path(
    patch,
    path = "/{itemId}",
    tag = "Items",
    request_body = ItemPatch,
    params(
        ("itemId" = i64, Path, description = "Item id"),
        ("X-Sharer-User-Id" = i64, Header, description = "Owner id")
    ),
    responses(
        (status = 200, description = "Item updated", body = Item),
        (status = 404, description = "Not the owner, or item missing", body = ErrorResponse)
    )
)]
async fn update_item<S: Store>(
    State(service): State<Arc<ItemService<S>>>,
    SharerId(owner_id): SharerId,
    Path(item_id): Path<i64>,
    Json(patch): Json<ItemPatch>,
) -> ItemResult<Json<Item>> {
    let item = service.update_item(owner_id, item_id, patch).await?;
    Ok(Json(item))
}

/// Search available items by name or description
#[utoipa::path(
    get,
    path = "/search",
    tag = "Items",
    params(SearchText, PageParams),
    responses(
        (status = 200, description = "Matching available items", body = Vec<Item>),
        (status = 400, description = "Invalid paging parameters", body = ErrorResponse)
    )
)]
async fn search_items<S: Store>(
    State(service): State<Arc<ItemService<S>>>,
    Query(search): Query<SearchText>,
    Query(params): Query<PageParams>,
) -> ItemResult<Json<Vec<Item>>> {
    let items = service.find_items_by_text(&search.text, params).await?;
    Ok(Json(items))
}

/// Comment on an item after a completed booking
#[utoipa::path(
    post,
    path = "/{itemId}/comment",
    tag = "Items",
    request_body = CreateComment,
    params(
        ("itemId" = i64, Path, description = "Item id"),
        ("X-Sharer-User-Id" = i64, Header, description = "Author id")
    ),
    responses(
        (status = 200, description = "Comment added", body = CommentDto),
        (status = 400, description = "No completed booking, or empty text", body = ErrorResponse),
        (status = 404, description = "User or item not found", body = ErrorResponse)
    )
)]
async fn add_comment<S: Store>(
    State(service): State<Arc<ItemService<S>>>,
    SharerId(user_id): SharerId,
    Path(item_id): Path<i64>,
    Json(input): Json<CreateComment>,
) -> ItemResult<Json<CommentDto>> {
    let comment = service.add_comment(user_id, item_id, input).await?;
    Ok(Json(comment))
}
