use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storage::{Booking, Comment, Item};
use utoipa::ToSchema;

/// Payload for listing a new item.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItem {
    pub name: String,
    pub description: String,
    pub available: bool,
    /// Set when the item is listed in answer to an item request
    pub request_id: Option<i64>,
}

/// Partial update: absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
}

impl ItemPatch {
    /// Merge the patch onto an existing item, overwriting only present
    /// fields.
    pub fn apply(&self, mut item: Item) -> Item {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(description) = &self.description {
            item.description = description.clone();
        }
        if let Some(available) = self.available {
            item.available = available;
        }
        item
    }
}

/// A booking reduced to what an item owner sees inline on the item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingBrief {
    pub id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub booker_id: i64,
}

impl From<Booking> for BookingBrief {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            start: booking.start,
            end: booking.end,
            booker_id: booking.booker_id,
        }
    }
}

/// Payload for commenting on an item.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateComment {
    pub text: String,
}

/// A comment with its author's display name joined in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: i64,
    pub text: String,
    pub author_name: String,
    pub created: DateTime<Utc>,
}

impl CommentDto {
    pub fn new(comment: Comment, author_name: String) -> Self {
        Self {
            id: comment.id,
            text: comment.text,
            author_name,
            created: comment.created,
        }
    }
}

/// An item enriched with its comments and, for the owner, the closest
/// bookings on either side of now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemWithBookings {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<i64>,
    pub last_booking: Option<BookingBrief>,
    pub next_booking: Option<BookingBrief>,
    pub comments: Vec<CommentDto>,
}

impl ItemWithBookings {
    pub fn new(
        item: Item,
        last_booking: Option<BookingBrief>,
        next_booking: Option<BookingBrief>,
        comments: Vec<CommentDto>,
    ) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            available: item.available,
            request_id: item.request_id,
            last_booking,
            next_booking,
            comments,
        }
    }
}
