use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{
    Booking, BookingQuery, BookingStatus, Comment, Item, NewBooking, NewComment, NewItem,
    NewRequest, Request, User,
};

#[derive(Debug, Error)]
pub enum StoreError {
    /// Unique-email constraint violation on user save/update.
    #[error("user with this email is already registered")]
    EmailTaken,

    /// An update targeted a row that no longer exists. The services always
    /// load before they write, so this indicates an inconsistency, not a
    /// routine miss.
    #[error("{0} vanished between read and write")]
    RowVanished(&'static str),

    #[error("storage backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A result slice: `offset` rows skipped, at most `limit` rows returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: usize,
    pub limit: usize,
}

/// Data access used by every domain service.
///
/// Finder methods mirror the lookup/filter queries the services need; all
/// listing methods have a deterministic order, noted per method. `page: None`
/// returns the full result set.
#[async_trait]
pub trait Store: Send + Sync {
    // --- users ---

    /// Persist a new user, assigning the next id. Fails with
    /// [`StoreError::EmailTaken`] if the email is already registered.
    async fn save_user(&self, name: String, email: String) -> StoreResult<User>;

    async fn find_user(&self, id: i64) -> StoreResult<Option<User>>;

    /// All users, ordered by id ascending.
    async fn all_users(&self) -> StoreResult<Vec<User>>;

    /// Overwrite an existing user. Fails with [`StoreError::EmailTaken`] if
    /// another user already holds the email.
    async fn update_user(&self, user: User) -> StoreResult<User>;

    /// Returns whether a user was removed.
    async fn delete_user(&self, id: i64) -> StoreResult<bool>;

    // --- items ---

    async fn save_item(&self, item: NewItem) -> StoreResult<Item>;

    async fn find_item(&self, id: i64) -> StoreResult<Option<Item>>;

    async fn update_item(&self, item: Item) -> StoreResult<Item>;

    /// Items owned by `owner_id`, ordered by id ascending.
    async fn items_by_owner(&self, owner_id: i64, page: Option<Page>) -> StoreResult<Vec<Item>>;

    /// Available items whose name or description contains `text`
    /// (case-insensitive), ordered by id ascending.
    async fn search_available_items(&self, text: &str, page: Option<Page>)
        -> StoreResult<Vec<Item>>;

    /// Items listed in answer to the given request, ordered by id ascending.
    async fn items_by_request(&self, request_id: i64) -> StoreResult<Vec<Item>>;

    // --- bookings ---

    async fn save_booking(&self, booking: NewBooking) -> StoreResult<Booking>;

    async fn find_booking(&self, id: i64) -> StoreResult<Option<Booking>>;

    async fn update_booking(&self, booking: Booking) -> StoreResult<Booking>;

    /// Bookings made by `booker_id` matching `query`, ordered by start
    /// descending.
    async fn bookings_by_booker(
        &self,
        booker_id: i64,
        query: BookingQuery,
        page: Option<Page>,
    ) -> StoreResult<Vec<Booking>>;

    /// Bookings on items owned by `owner_id` matching `query`, ordered by
    /// start descending.
    async fn bookings_by_owner(
        &self,
        owner_id: i64,
        query: BookingQuery,
        page: Option<Page>,
    ) -> StoreResult<Vec<Booking>>;

    /// The booking on `item_id` that ended most recently before `now`, any
    /// status.
    async fn last_booking(&self, item_id: i64, now: DateTime<Utc>)
        -> StoreResult<Option<Booking>>;

    /// The earliest booking on `item_id` starting after `now`, any status.
    async fn next_booking(&self, item_id: i64, now: DateTime<Utc>)
        -> StoreResult<Option<Booking>>;

    /// Whether `booker_id` has a booking on `item_id` with the given status
    /// that ended strictly before `now` (comment eligibility).
    async fn has_finished_booking(
        &self,
        booker_id: i64,
        item_id: i64,
        status: BookingStatus,
        now: DateTime<Utc>,
    ) -> StoreResult<bool>;

    // --- comments ---

    async fn save_comment(&self, comment: NewComment) -> StoreResult<Comment>;

    /// Comments on an item, ordered by id ascending.
    async fn comments_by_item(&self, item_id: i64) -> StoreResult<Vec<Comment>>;

    // --- requests ---

    async fn save_request(&self, request: NewRequest) -> StoreResult<Request>;

    async fn find_request(&self, id: i64) -> StoreResult<Option<Request>>;

    /// Requests posted by `requester_id`, newest first.
    async fn requests_by_requester(&self, requester_id: i64) -> StoreResult<Vec<Request>>;

    /// Requests posted by everyone except `requester_id`, newest first.
    async fn requests_by_others(
        &self,
        requester_id: i64,
        page: Option<Page>,
    ) -> StoreResult<Vec<Request>>;
}
