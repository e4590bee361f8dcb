use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Booking lifecycle status.
///
/// Distinct from the query-side booking *state* (ALL/CURRENT/PAST/...), which
/// lives in the bookings domain: status is what is stored, state is how
/// listings are filtered.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum BookingStatus {
    /// Created, awaiting the owner's decision
    Waiting,
    /// Confirmed by the item owner (terminal)
    Approved,
    /// Declined by the item owner (terminal)
    Rejected,
    /// Withdrawn by the booker
    Canceled,
}

/// A registered user. Email is unique across the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// An item listed for sharing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Whether the owner currently accepts bookings
    pub available: bool,
    pub owner_id: i64,
    /// Set when the item was listed in answer to an item request
    pub request_id: Option<i64>,
}

/// A booking of an item for a time window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
    pub booker_id: i64,
    pub item_id: i64,
}

/// A comment left on an item after a completed booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub item_id: i64,
    pub author_id: i64,
    pub created: DateTime<Utc>,
}

/// A user's posted need for an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub id: i64,
    pub description: String,
    pub requester_id: i64,
    pub created: DateTime<Utc>,
}

/// Insert payload for [`crate::Store::save_item`]; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: i64,
    pub request_id: Option<i64>,
}

/// Insert payload for [`crate::Store::save_booking`].
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
    pub booker_id: i64,
    pub item_id: i64,
}

/// Insert payload for [`crate::Store::save_comment`].
#[derive(Debug, Clone)]
pub struct NewComment {
    pub text: String,
    pub item_id: i64,
    pub author_id: i64,
    pub created: DateTime<Utc>,
}

/// Insert payload for [`crate::Store::save_request`].
#[derive(Debug, Clone)]
pub struct NewRequest {
    pub description: String,
    pub requester_id: i64,
    pub created: DateTime<Utc>,
}

/// Predicates for booking listings, combined with AND semantics.
///
/// The bookings domain translates its query state (CURRENT, PAST, ...) into
/// one of these; results are always ordered by start descending.
#[derive(Debug, Clone, Default)]
pub struct BookingQuery {
    pub status: Option<BookingStatus>,
    pub starts_before: Option<DateTime<Utc>>,
    pub starts_after: Option<DateTime<Utc>>,
    pub ends_before: Option<DateTime<Utc>>,
    pub ends_after: Option<DateTime<Utc>>,
}

impl BookingQuery {
    pub fn matches(&self, booking: &Booking) -> bool {
        if let Some(status) = self.status {
            if booking.status != status {
                return false;
            }
        }
        if let Some(t) = self.starts_before {
            if booking.start >= t {
                return false;
            }
        }
        if let Some(t) = self.starts_after {
            if booking.start <= t {
                return false;
            }
        }
        if let Some(t) = self.ends_before {
            if booking.end >= t {
                return false;
            }
        }
        if let Some(t) = self.ends_after {
            if booking.end <= t {
                return false;
            }
        }
        true
    }
}
