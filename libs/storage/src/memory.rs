use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::models::{
    Booking, BookingQuery, BookingStatus, Comment, Item, NewBooking, NewComment, NewItem,
    NewRequest, Request, User,
};
use crate::store::{Page, Store, StoreError, StoreResult};

/// One entity kind: rows keyed by id plus the id sequence.
#[derive(Debug)]
struct Table<T> {
    rows: HashMap<i64, T>,
    next_id: i64,
}

impl<T> Table<T> {
    fn new() -> Self {
        Self {
            rows: HashMap::new(),
            next_id: 1,
        }
    }

    /// Assign the next id and insert the row built from it.
    fn insert(&mut self, build: impl FnOnce(i64) -> T) -> T
    where
        T: Clone,
    {
        let id = self.next_id;
        self.next_id += 1;
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }
}

fn paginate<T>(rows: Vec<T>, page: Option<Page>) -> Vec<T> {
    match page {
        None => rows,
        Some(p) => rows.into_iter().skip(p.offset).take(p.limit).collect(),
    }
}

/// In-memory [`Store`] implementation.
///
/// Ids grow monotonically from 1, one sequence per entity kind. All listing
/// methods sort before slicing so pagination is deterministic.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: RwLock<Table<User>>,
    items: RwLock<Table<Item>>,
    bookings: RwLock<Table<Booking>>,
    comments: RwLock<Table<Comment>>,
    requests: RwLock<Table<Request>>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Table::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn save_user(&self, name: String, email: String) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.rows.values().any(|u| u.email == email) {
            return Err(StoreError::EmailTaken);
        }
        let user = users.insert(|id| User { id, name, email });
        tracing::info!(user_id = user.id, "Saved user");
        Ok(user)
    }

    async fn find_user(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.rows.get(&id).cloned())
    }

    async fn all_users(&self) -> StoreResult<Vec<User>> {
        let mut all: Vec<User> = self.users.read().await.rows.values().cloned().collect();
        all.sort_by_key(|u| u.id);
        Ok(all)
    }

    async fn update_user(&self, user: User) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users
            .rows
            .values()
            .any(|u| u.email == user.email && u.id != user.id)
        {
            return Err(StoreError::EmailTaken);
        }
        if !users.rows.contains_key(&user.id) {
            return Err(StoreError::RowVanished("user"));
        }
        users.rows.insert(user.id, user.clone());
        tracing::info!(user_id = user.id, "Updated user");
        Ok(user)
    }

    async fn delete_user(&self, id: i64) -> StoreResult<bool> {
        let removed = self.users.write().await.rows.remove(&id).is_some();
        if removed {
            tracing::info!(user_id = id, "Deleted user");
        }
        Ok(removed)
    }

    async fn save_item(&self, item: NewItem) -> StoreResult<Item> {
        let saved = self.items.write().await.insert(|id| Item {
            id,
            name: item.name,
            description: item.description,
            available: item.available,
            owner_id: item.owner_id,
            request_id: item.request_id,
        });
        tracing::info!(item_id = saved.id, "Saved item");
        Ok(saved)
    }

    async fn find_item(&self, id: i64) -> StoreResult<Option<Item>> {
        Ok(self.items.read().await.rows.get(&id).cloned())
    }

    async fn update_item(&self, item: Item) -> StoreResult<Item> {
        let mut items = self.items.write().await;
        if !items.rows.contains_key(&item.id) {
            return Err(StoreError::RowVanished("item"));
        }
        items.rows.insert(item.id, item.clone());
        tracing::info!(item_id = item.id, "Updated item");
        Ok(item)
    }

    async fn items_by_owner(&self, owner_id: i64, page: Option<Page>) -> StoreResult<Vec<Item>> {
        let mut owned: Vec<Item> = self
            .items
            .read()
            .await
            .rows
            .values()
            .filter(|i| i.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by_key(|i| i.id);
        Ok(paginate(owned, page))
    }

    async fn search_available_items(
        &self,
        text: &str,
        page: Option<Page>,
    ) -> StoreResult<Vec<Item>> {
        let needle = text.to_lowercase();
        let mut found: Vec<Item> = self
            .items
            .read()
            .await
            .rows
            .values()
            .filter(|i| {
                i.available
                    && (i.name.to_lowercase().contains(&needle)
                        || i.description.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
        found.sort_by_key(|i| i.id);
        Ok(paginate(found, page))
    }

    async fn items_by_request(&self, request_id: i64) -> StoreResult<Vec<Item>> {
        let mut answers: Vec<Item> = self
            .items
            .read()
            .await
            .rows
            .values()
            .filter(|i| i.request_id == Some(request_id))
            .cloned()
            .collect();
        answers.sort_by_key(|i| i.id);
        Ok(answers)
    }

    async fn save_booking(&self, booking: NewBooking) -> StoreResult<Booking> {
        let saved = self.bookings.write().await.insert(|id| Booking {
            id,
            start: booking.start,
            end: booking.end,
            status: booking.status,
            booker_id: booking.booker_id,
            item_id: booking.item_id,
        });
        tracing::info!(booking_id = saved.id, "Saved booking");
        Ok(saved)
    }

    async fn find_booking(&self, id: i64) -> StoreResult<Option<Booking>> {
        Ok(self.bookings.read().await.rows.get(&id).cloned())
    }

    async fn update_booking(&self, booking: Booking) -> StoreResult<Booking> {
        let mut bookings = self.bookings.write().await;
        if !bookings.rows.contains_key(&booking.id) {
            return Err(StoreError::RowVanished("booking"));
        }
        bookings.rows.insert(booking.id, booking.clone());
        tracing::info!(booking_id = booking.id, status = %booking.status, "Updated booking");
        Ok(booking)
    }

    async fn bookings_by_booker(
        &self,
        booker_id: i64,
        query: BookingQuery,
        page: Option<Page>,
    ) -> StoreResult<Vec<Booking>> {
        let mut matched: Vec<Booking> = self
            .bookings
            .read()
            .await
            .rows
            .values()
            .filter(|b| b.booker_id == booker_id && query.matches(b))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.start.cmp(&a.start));
        Ok(paginate(matched, page))
    }

    async fn bookings_by_owner(
        &self,
        owner_id: i64,
        query: BookingQuery,
        page: Option<Page>,
    ) -> StoreResult<Vec<Booking>> {
        let owned: Vec<i64> = self
            .items
            .read()
            .await
            .rows
            .values()
            .filter(|i| i.owner_id == owner_id)
            .map(|i| i.id)
            .collect();
        let mut matched: Vec<Booking> = self
            .bookings
            .read()
            .await
            .rows
            .values()
            .filter(|b| owned.contains(&b.item_id) && query.matches(b))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.start.cmp(&a.start));
        Ok(paginate(matched, page))
    }

    async fn last_booking(
        &self,
        item_id: i64,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<Booking>> {
        Ok(self
            .bookings
            .read()
            .await
            .rows
            .values()
            .filter(|b| b.item_id == item_id && b.end < now)
            .max_by_key(|b| b.end)
            .cloned())
    }

    async fn next_booking(
        &self,
        item_id: i64,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<Booking>> {
        Ok(self
            .bookings
            .read()
            .await
            .rows
            .values()
            .filter(|b| b.item_id == item_id && b.start > now)
            .min_by_key(|b| b.start)
            .cloned())
    }

    async fn has_finished_booking(
        &self,
        booker_id: i64,
        item_id: i64,
        status: BookingStatus,
        now: DateTime<Utc>,
    ) -> StoreResult<bool> {
        Ok(self.bookings.read().await.rows.values().any(|b| {
            b.booker_id == booker_id && b.item_id == item_id && b.status == status && b.end < now
        }))
    }

    async fn save_comment(&self, comment: NewComment) -> StoreResult<Comment> {
        let saved = self.comments.write().await.insert(|id| Comment {
            id,
            text: comment.text,
            item_id: comment.item_id,
            author_id: comment.author_id,
            created: comment.created,
        });
        tracing::info!(comment_id = saved.id, "Saved comment");
        Ok(saved)
    }

    async fn comments_by_item(&self, item_id: i64) -> StoreResult<Vec<Comment>> {
        let mut on_item: Vec<Comment> = self
            .comments
            .read()
            .await
            .rows
            .values()
            .filter(|c| c.item_id == item_id)
            .cloned()
            .collect();
        on_item.sort_by_key(|c| c.id);
        Ok(on_item)
    }

    async fn save_request(&self, request: NewRequest) -> StoreResult<Request> {
        let saved = self.requests.write().await.insert(|id| Request {
            id,
            description: request.description,
            requester_id: request.requester_id,
            created: request.created,
        });
        tracing::info!(request_id = saved.id, "Saved request");
        Ok(saved)
    }

    async fn find_request(&self, id: i64) -> StoreResult<Option<Request>> {
        Ok(self.requests.read().await.rows.get(&id).cloned())
    }

    async fn requests_by_requester(&self, requester_id: i64) -> StoreResult<Vec<Request>> {
        let mut own: Vec<Request> = self
            .requests
            .read()
            .await
            .rows
            .values()
            .filter(|r| r.requester_id == requester_id)
            .cloned()
            .collect();
        own.sort_by(|a, b| b.created.cmp(&a.created).then(b.id.cmp(&a.id)));
        Ok(own)
    }

    async fn requests_by_others(
        &self,
        requester_id: i64,
        page: Option<Page>,
    ) -> StoreResult<Vec<Request>> {
        let mut others: Vec<Request> = self
            .requests
            .read()
            .await
            .rows
            .values()
            .filter(|r| r.requester_id != requester_id)
            .cloned()
            .collect();
        others.sort_by(|a, b| b.created.cmp(&a.created).then(b.id.cmp(&a.id)));
        Ok(paginate(others, page))
    }
}
