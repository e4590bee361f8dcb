use axum_helpers::{PageParams, PageWindow};
use chrono::Utc;
use std::sync::Arc;
use storage::{NewRequest, Page, Request, Store};
use tracing::info;

use crate::error::{RequestError, RequestResult};
use crate::models::{CreateRequest, RequestDto};

fn page(window: Option<PageWindow>) -> Option<Page> {
    window.map(|w| Page {
        offset: w.offset,
        limit: w.limit,
    })
}

/// Business logic for item requests and the listings answering them.
#[derive(Clone)]
pub struct RequestService<S: Store> {
    store: Arc<S>,
}

impl<S: Store> RequestService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Post a request for an item nobody has listed yet.
    pub async fn add_request(
        &self,
        user_id: i64,
        input: CreateRequest,
    ) -> RequestResult<RequestDto> {
        self.require_user(user_id).await?;
        if input.description.trim().is_empty() {
            return Err(RequestError::EmptyDescription);
        }
        let request = self
            .store
            .save_request(NewRequest {
                description: input.description,
                requester_id: user_id,
                created: Utc::now(),
            })
            .await?;
        info!(request_id = request.id, user_id, "Item request posted");
        Ok(RequestDto::new(request, Vec::new()))
    }

    /// The calling user's own requests, newest first.
    pub async fn get_own_requests(&self, user_id: i64) -> RequestResult<Vec<RequestDto>> {
        self.require_user(user_id).await?;
        let requests = self.store.requests_by_requester(user_id).await?;
        self.enrich_all(requests).await
    }

    /// Everyone else's requests, newest first, paged.
    pub async fn get_requests(
        &self,
        user_id: i64,
        params: PageParams,
    ) -> RequestResult<Vec<RequestDto>> {
        self.require_user(user_id).await?;
        let window = params.window()?;
        let requests = self
            .store
            .requests_by_others(user_id, page(window))
            .await?;
        self.enrich_all(requests).await
    }

    /// One request with its answering items.
    pub async fn get_request_by_id(
        &self,
        user_id: i64,
        request_id: i64,
    ) -> RequestResult<RequestDto> {
        self.require_user(user_id).await?;
        let request = self
            .store
            .find_request(request_id)
            .await?
            .ok_or(RequestError::RequestNotFound(request_id))?;
        self.enrich(request).await
    }

    async fn require_user(&self, user_id: i64) -> RequestResult<()> {
        self.store
            .find_user(user_id)
            .await?
            .map(|_| ())
            .ok_or(RequestError::UserNotFound(user_id))
    }

    async fn enrich(&self, request: Request) -> RequestResult<RequestDto> {
        let items = self.store.items_by_request(request.id).await?;
        Ok(RequestDto::new(request, items))
    }

    async fn enrich_all(&self, requests: Vec<Request>) -> RequestResult<Vec<RequestDto>> {
        let mut dtos = Vec::with_capacity(requests.len());
        for request in requests {
            dtos.push(self.enrich(request).await?);
        }
        Ok(dtos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::{InMemoryStore, NewItem};

    async fn setup() -> (Arc<InMemoryStore>, RequestService<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        let service = RequestService::new(Arc::clone(&store));
        (store, service)
    }

    async fn user(store: &InMemoryStore, name: &str) -> i64 {
        store
            .save_user(name.to_string(), format!("{name}@example.com"))
            .await
            .unwrap()
            .id
    }

    fn need(text: &str) -> CreateRequest {
        CreateRequest {
            description: text.to_string(),
        }
    }

    #[tokio::test]
    async fn add_request_requires_existing_user() {
        let (_, service) = setup().await;
        let err = service.add_request(9, need("a drill")).await.unwrap_err();
        assert!(matches!(err, RequestError::UserNotFound(9)));
    }

    #[tokio::test]
    async fn add_request_rejects_blank_description() {
        let (store, service) = setup().await;
        let requester = user(&store, "alice").await;

        let err = service
            .add_request(requester, need("   "))
            .await
            .unwrap_err();

        assert!(matches!(err, RequestError::EmptyDescription));
    }

    #[tokio::test]
    async fn new_request_starts_with_no_items() {
        let (store, service) = setup().await;
        let requester = user(&store, "alice").await;

        let request = service.add_request(requester, need("a drill")).await.unwrap();

        assert_eq!(request.id, 1);
        assert!(request.items.is_empty());
    }

    #[tokio::test]
    async fn requests_collect_items_listed_in_answer() {
        let (store, service) = setup().await;
        let requester = user(&store, "alice").await;
        let owner = user(&store, "bob").await;

        let request = service.add_request(requester, need("a drill")).await.unwrap();
        store
            .save_item(NewItem {
                name: "drill".into(),
                description: "cordless drill".into(),
                available: true,
                owner_id: owner,
                request_id: Some(request.id),
            })
            .await
            .unwrap();

        let found = service
            .get_request_by_id(requester, request.id)
            .await
            .unwrap();

        assert_eq!(found.items.len(), 1);
        assert_eq!(found.items[0].name, "drill");
    }

    #[tokio::test]
    async fn own_requests_exclude_other_peoples() {
        let (store, service) = setup().await;
        let alice = user(&store, "alice").await;
        let bob = user(&store, "bob").await;
        service.add_request(alice, need("a drill")).await.unwrap();
        service.add_request(bob, need("a ladder")).await.unwrap();

        let own = service.get_own_requests(alice).await.unwrap();

        assert_eq!(own.len(), 1);
        assert_eq!(own[0].description, "a drill");
    }

    #[tokio::test]
    async fn listing_others_requests_excludes_the_callers() {
        let (store, service) = setup().await;
        let alice = user(&store, "alice").await;
        let bob = user(&store, "bob").await;
        service.add_request(alice, need("a drill")).await.unwrap();
        service.add_request(bob, need("a ladder")).await.unwrap();

        let others = service
            .get_requests(alice, PageParams::new(None, None))
            .await
            .unwrap();

        assert_eq!(others.len(), 1);
        assert_eq!(others[0].description, "a ladder");
    }

    #[tokio::test]
    async fn listing_others_requests_still_checks_the_caller() {
        let (_, service) = setup().await;
        let err = service
            .get_requests(9, PageParams::new(None, None))
            .await
            .unwrap_err();
        assert!(matches!(err, RequestError::UserNotFound(9)));
    }

    #[tokio::test]
    async fn missing_request_is_not_found() {
        let (store, service) = setup().await;
        let requester = user(&store, "alice").await;

        let err = service.get_request_by_id(requester, 5).await.unwrap_err();

        assert!(matches!(err, RequestError::RequestNotFound(5)));
    }
}
