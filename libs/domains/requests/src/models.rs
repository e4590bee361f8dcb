use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storage::{Item, Request};
use utoipa::ToSchema;

/// Payload for posting an item request.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateRequest {
    pub description: String,
}

/// An item request with the listings posted in answer to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestDto {
    pub id: i64,
    pub description: String,
    pub created: DateTime<Utc>,
    pub items: Vec<Item>,
}

impl RequestDto {
    pub fn new(request: Request, items: Vec<Item>) -> Self {
        Self {
            id: request.id,
            description: request.description,
            created: request.created,
            items,
        }
    }
}
