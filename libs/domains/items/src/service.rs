use axum_helpers::{PageParams, PageWindow};
use chrono::Utc;
use std::sync::Arc;
use storage::{BookingStatus, Comment, Item, NewComment, NewItem, Page, Store};
use tracing::info;

use crate::error::{ItemError, ItemResult};
use crate::models::{CommentDto, CreateComment, CreateItem, ItemPatch, ItemWithBookings};

fn page(window: Option<PageWindow>) -> Option<Page> {
    window.map(|w| Page {
        offset: w.offset,
        limit: w.limit,
    })
}

/// Business logic for item listings and their comments.
#[derive(Clone)]
pub struct ItemService<S: Store> {
    store: Arc<S>,
}

impl<S: Store> ItemService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// List a new item owned by `owner_id`.
    pub async fn add_item(&self, owner_id: i64, input: CreateItem) -> ItemResult<Item> {
        self.require_user(owner_id).await?;
        let item = self
            .store
            .save_item(NewItem {
                name: input.name,
                description: input.description,
                available: input.available,
                owner_id,
                request_id: input.request_id,
            })
            .await?;
        info!(item_id = item.id, owner_id, "Item listed");
        Ok(item)
    }

    /// Fetch one item with comments. The closest past and future bookings
    /// are attached only when the viewer owns the item.
    pub async fn find_item_by_id(&self, user_id: i64, item_id: i64) -> ItemResult<ItemWithBookings> {
        self.require_user(user_id).await?;
        let item = self
            .store
            .find_item(item_id)
            .await?
            .ok_or(ItemError::ItemNotFound(item_id))?;
        self.enrich(item, user_id).await
    }

    /// All items of one owner, ascending by id, with the owner's booking
    /// view attached.
    pub async fn find_all_user_items(
        &self,
        owner_id: i64,
        params: PageParams,
    ) -> ItemResult<Vec<ItemWithBookings>> {
        let window = params.window()?;
        let items = self.store.items_by_owner(owner_id, page(window)).await?;
        let mut enriched = Vec::with_capacity(items.len());
        for item in items {
            enriched.push(self.enrich(item, owner_id).await?);
        }
        Ok(enriched)
    }

    /// Edit an item. Only the owner may edit, and absent patch fields keep
    /// their current value.
    pub async fn update_item(
        &self,
        owner_id: i64,
        item_id: i64,
        patch: ItemPatch,
    ) -> ItemResult<Item> {
        self.require_user(owner_id).await?;
        let item = self
            .store
            .find_item(item_id)
            .await?
            .ok_or(ItemError::ItemNotFound(item_id))?;
        if item.owner_id != owner_id {
            return Err(ItemError::NotOwner(item_id, owner_id));
        }
        let updated = self.store.update_item(patch.apply(item)).await?;
        info!(item_id, owner_id, "Item updated");
        Ok(updated)
    }

    /// Case-insensitive substring search over available items. A blank
    /// query short-circuits to an empty list without touching the store.
    pub async fn find_items_by_text(
        &self,
        text: &str,
        params: PageParams,
    ) -> ItemResult<Vec<Item>> {
        // Blank text wins over everything else, paging included.
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let window = params.window()?;
        Ok(self
            .store
            .search_available_items(text, page(window))
            .await?)
    }

    /// Leave a comment on an item. Only allowed after an approved booking
    /// by the author that has already ended.
    pub async fn add_comment(
        &self,
        user_id: i64,
        item_id: i64,
        input: CreateComment,
    ) -> ItemResult<CommentDto> {
        let author = self
            .store
            .find_user(user_id)
            .await?
            .ok_or(ItemError::UserNotFound(user_id))?;
        self.store
            .find_item(item_id)
            .await?
            .ok_or(ItemError::ItemNotFound(item_id))?;
        if input.text.trim().is_empty() {
            return Err(ItemError::EmptyComment);
        }
        let now = Utc::now();
        if !self
            .store
            .has_finished_booking(user_id, item_id, BookingStatus::Approved, now)
            .await?
        {
            return Err(ItemError::CommentNotAllowed(user_id, item_id));
        }
        let comment = self
            .store
            .save_comment(NewComment {
                text: input.text,
                item_id,
                author_id: user_id,
                created: now,
            })
            .await?;
        info!(comment_id = comment.id, item_id, user_id, "Comment added");
        Ok(CommentDto::new(comment, author.name))
    }

    async fn require_user(&self, user_id: i64) -> ItemResult<()> {
        self.store
            .find_user(user_id)
            .await?
            .map(|_| ())
            .ok_or(ItemError::UserNotFound(user_id))
    }

    async fn enrich(&self, item: Item, viewer_id: i64) -> ItemResult<ItemWithBookings> {
        let comments = self.store.comments_by_item(item.id).await?;
        let comments = self.with_author_names(comments).await?;

        let (last, next) = if viewer_id == item.owner_id {
            let now = Utc::now();
            (
                self.store.last_booking(item.id, now).await?,
                self.store.next_booking(item.id, now).await?,
            )
        } else {
            (None, None)
        };

        Ok(ItemWithBookings::new(
            item,
            last.map(Into::into),
            next.map(Into::into),
            comments,
        ))
    }

    async fn with_author_names(&self, comments: Vec<Comment>) -> ItemResult<Vec<CommentDto>> {
        let mut dtos = Vec::with_capacity(comments.len());
        for comment in comments {
            let author = self
                .store
                .find_user(comment.author_id)
                .await?
                .ok_or(ItemError::UserNotFound(comment.author_id))?;
            dtos.push(CommentDto::new(comment, author.name));
        }
        Ok(dtos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use storage::{InMemoryStore, NewBooking};

    async fn setup() -> (Arc<InMemoryStore>, ItemService<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        let service = ItemService::new(Arc::clone(&store));
        (store, service)
    }

    async fn user(store: &InMemoryStore, name: &str) -> i64 {
        store
            .save_user(name.to_string(), format!("{name}@example.com"))
            .await
            .unwrap()
            .id
    }

    fn drill(request_id: Option<i64>) -> CreateItem {
        CreateItem {
            name: "drill".to_string(),
            description: "cordless drill".to_string(),
            available: true,
            request_id,
        }
    }

    #[tokio::test]
    async fn add_item_requires_existing_owner() {
        let (_, service) = setup().await;
        let err = service.add_item(7, drill(None)).await.unwrap_err();
        assert!(matches!(err, ItemError::UserNotFound(7)));
    }

    #[tokio::test]
    async fn add_item_assigns_ownership() {
        let (store, service) = setup().await;
        let owner = user(&store, "alice").await;

        let item = service.add_item(owner, drill(Some(3))).await.unwrap();

        assert_eq!(item.id, 1);
        assert_eq!(item.owner_id, owner);
        assert_eq!(item.request_id, Some(3));
    }

    #[tokio::test]
    async fn update_item_rejects_non_owner() {
        let (store, service) = setup().await;
        let owner = user(&store, "alice").await;
        let other = user(&store, "bob").await;
        let item = service.add_item(owner, drill(None)).await.unwrap();

        let patch = ItemPatch {
            available: Some(false),
            ..ItemPatch::default()
        };
        let err = service.update_item(other, item.id, patch).await.unwrap_err();

        assert!(matches!(err, ItemError::NotOwner(_, _)));
    }

    #[tokio::test]
    async fn update_item_merges_partial_patch() {
        let (store, service) = setup().await;
        let owner = user(&store, "alice").await;
        let item = service.add_item(owner, drill(None)).await.unwrap();

        let patch = ItemPatch {
            description: Some("with two batteries".to_string()),
            ..ItemPatch::default()
        };
        let updated = service.update_item(owner, item.id, patch).await.unwrap();

        assert_eq!(updated.name, "drill");
        assert_eq!(updated.description, "with two batteries");
        assert!(updated.available);
    }

    #[tokio::test]
    async fn blank_search_text_returns_empty_without_store_access() {
        let (store, service) = setup().await;
        let owner = user(&store, "alice").await;
        service.add_item(owner, drill(None)).await.unwrap();

        let found = service
            .find_items_by_text("   ", PageParams::new(None, None))
            .await
            .unwrap();

        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn blank_search_text_returns_empty_even_with_bad_paging() {
        let (_, service) = setup().await;

        let found = service
            .find_items_by_text("", PageParams::new(Some(-1), Some(5)))
            .await
            .unwrap();

        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn search_rejects_bad_paging_before_querying() {
        let (_, service) = setup().await;
        let err = service
            .find_items_by_text("drill", PageParams::new(Some(-1), Some(5)))
            .await
            .unwrap_err();
        assert!(matches!(err, ItemError::Page(_)));
    }

    #[tokio::test]
    async fn owner_sees_bookings_visitor_does_not() {
        let (store, service) = setup().await;
        let owner = user(&store, "alice").await;
        let booker = user(&store, "bob").await;
        let item = service.add_item(owner, drill(None)).await.unwrap();

        let now = Utc::now();
        store
            .save_booking(NewBooking {
                start: now - Duration::hours(3),
                end: now - Duration::hours(2),
                status: BookingStatus::Approved,
                booker_id: booker,
                item_id: item.id,
            })
            .await
            .unwrap();
        store
            .save_booking(NewBooking {
                start: now + Duration::hours(2),
                end: now + Duration::hours(3),
                status: BookingStatus::Waiting,
                booker_id: booker,
                item_id: item.id,
            })
            .await
            .unwrap();

        let seen_by_owner = service.find_item_by_id(owner, item.id).await.unwrap();
        assert!(seen_by_owner.last_booking.is_some());
        assert!(seen_by_owner.next_booking.is_some());
        assert_eq!(seen_by_owner.last_booking.unwrap().booker_id, booker);

        let seen_by_visitor = service.find_item_by_id(booker, item.id).await.unwrap();
        assert!(seen_by_visitor.last_booking.is_none());
        assert!(seen_by_visitor.next_booking.is_none());
    }

    #[tokio::test]
    async fn comment_requires_finished_approved_booking() {
        let (store, service) = setup().await;
        let owner = user(&store, "alice").await;
        let booker = user(&store, "bob").await;
        let item = service.add_item(owner, drill(None)).await.unwrap();

        let input = CreateComment {
            text: "great drill".to_string(),
        };
        let err = service
            .add_comment(booker, item.id, input.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, ItemError::CommentNotAllowed(_, _)));

        // A booking that ended but was never approved still does not qualify.
        let now = Utc::now();
        store
            .save_booking(NewBooking {
                start: now - Duration::hours(3),
                end: now - Duration::hours(2),
                status: BookingStatus::Rejected,
                booker_id: booker,
                item_id: item.id,
            })
            .await
            .unwrap();
        let err = service
            .add_comment(booker, item.id, input.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, ItemError::CommentNotAllowed(_, _)));

        store
            .save_booking(NewBooking {
                start: now - Duration::hours(2),
                end: now - Duration::hours(1),
                status: BookingStatus::Approved,
                booker_id: booker,
                item_id: item.id,
            })
            .await
            .unwrap();
        let comment = service.add_comment(booker, item.id, input).await.unwrap();

        assert_eq!(comment.author_name, "bob");
        assert_eq!(comment.text, "great drill");
    }

    #[tokio::test]
    async fn comment_rejects_blank_text() {
        let (store, service) = setup().await;
        let owner = user(&store, "alice").await;
        let booker = user(&store, "bob").await;
        let item = service.add_item(owner, drill(None)).await.unwrap();

        let err = service
            .add_comment(
                booker,
                item.id,
                CreateComment {
                    text: "  ".to_string(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ItemError::EmptyComment));
    }

    #[tokio::test]
    async fn comments_carry_author_names_for_every_viewer() {
        let (store, service) = setup().await;
        let owner = user(&store, "alice").await;
        let booker = user(&store, "bob").await;
        let item = service.add_item(owner, drill(None)).await.unwrap();

        let now = Utc::now();
        store
            .save_booking(NewBooking {
                start: now - Duration::hours(2),
                end: now - Duration::hours(1),
                status: BookingStatus::Approved,
                booker_id: booker,
                item_id: item.id,
            })
            .await
            .unwrap();
        service
            .add_comment(
                booker,
                item.id,
                CreateComment {
                    text: "worked well".to_string(),
                },
            )
            .await
            .unwrap();

        let seen = service.find_item_by_id(booker, item.id).await.unwrap();
        assert_eq!(seen.comments.len(), 1);
        assert_eq!(seen.comments[0].author_name, "bob");
    }
}
