use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use storage::{Booking, BookingQuery, BookingStatus, Item, User};
use strum::{Display, EnumString};
use utoipa::ToSchema;

use crate::error::BookingError;

/// Query-side filter over booking listings.
///
/// Distinct from [`BookingStatus`]: status is what is stored on a booking,
/// state is how a listing is narrowed relative to now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, ToSchema)]
#[strum(serialize_all = "UPPERCASE")]
pub enum BookingState {
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl BookingState {
    /// Parse the wire value; unrecognized values are a validation failure.
    pub fn parse(state: &str) -> Result<Self, BookingError> {
        Self::from_str(state).map_err(|_| BookingError::UnknownState(state.to_string()))
    }

    /// Translate the state into store predicates evaluated against `now`.
    pub fn query(self, now: DateTime<Utc>) -> BookingQuery {
        match self {
            BookingState::All => BookingQuery::default(),
            BookingState::Current => BookingQuery {
                starts_before: Some(now),
                ends_after: Some(now),
                ..BookingQuery::default()
            },
            BookingState::Past => BookingQuery {
                starts_before: Some(now),
                ends_before: Some(now),
                ..BookingQuery::default()
            },
            BookingState::Future => BookingQuery {
                starts_after: Some(now),
                ends_after: Some(now),
                ..BookingQuery::default()
            },
            BookingState::Waiting => BookingQuery {
                status: Some(BookingStatus::Waiting),
                ..BookingQuery::default()
            },
            BookingState::Rejected => BookingQuery {
                status: Some(BookingStatus::Rejected),
                ..BookingQuery::default()
            },
        }
    }
}

/// Payload for requesting a booking.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    pub item_id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// The booker as shown inline on a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
        }
    }
}

/// The booked item as shown inline on a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ItemSummary {
    pub id: i64,
    pub name: String,
}

impl From<Item> for ItemSummary {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
        }
    }
}

/// A booking with its booker and item joined in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
    pub booker: UserSummary,
    pub item: ItemSummary,
}

impl BookingResponse {
    pub fn new(booking: Booking, booker: User, item: Item) -> Self {
        Self {
            id: booking.id,
            start: booking.start,
            end: booking.end,
            status: booking.status,
            booker: booker.into(),
            item: item.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_parses_wire_values() {
        assert_eq!(BookingState::parse("ALL").unwrap(), BookingState::All);
        assert_eq!(
            BookingState::parse("CURRENT").unwrap(),
            BookingState::Current
        );
        assert_eq!(
            BookingState::parse("REJECTED").unwrap(),
            BookingState::Rejected
        );
    }

    #[test]
    fn unknown_state_carries_the_offending_value() {
        let err = BookingState::parse("SOMEDAY").unwrap_err();
        assert_eq!(err.to_string(), "Unknown state: SOMEDAY");
    }

    #[test]
    fn state_displays_uppercase() {
        assert_eq!(BookingState::Future.to_string(), "FUTURE");
    }

    #[test]
    fn current_state_bounds_both_sides_of_now() {
        let now = Utc::now();
        let query = BookingState::Current.query(now);
        assert_eq!(query.starts_before, Some(now));
        assert_eq!(query.ends_after, Some(now));
        assert_eq!(query.status, None);
    }

    #[test]
    fn waiting_state_filters_by_status_only() {
        let query = BookingState::Waiting.query(Utc::now());
        assert_eq!(query.status, Some(BookingStatus::Waiting));
        assert_eq!(query.starts_before, None);
        assert_eq!(query.ends_before, None);
    }
}
