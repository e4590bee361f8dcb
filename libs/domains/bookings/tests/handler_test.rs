//! Handler tests for the Bookings domain
//!
//! These tests verify that HTTP handlers work correctly:
//! - Header-based identity and query parameters (state, approved, paging)
//! - Status codes, including 500 for an unrecognized state value
//! - Enriched response shape (nested booker and item summaries)

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use domain_bookings::*;
use http_body_util::BodyExt;
use serde_json::json;
use std::sync::Arc;
use storage::{InMemoryStore, NewItem, Store};
use tower::ServiceExt; // For oneshot()

struct Fixture {
    app: Router,
    owner: i64,
    booker: i64,
    item: i64,
}

async fn fixture() -> Fixture {
    let store = Arc::new(InMemoryStore::new());
    let owner = store
        .save_user("alice".into(), "alice@example.com".into())
        .await
        .unwrap()
        .id;
    let booker = store
        .save_user("bob".into(), "bob@example.com".into())
        .await
        .unwrap()
        .id;
    let item = store
        .save_item(NewItem {
            name: "drill".into(),
            description: "cordless drill".into(),
            available: true,
            owner_id: owner,
            request_id: None,
        })
        .await
        .unwrap()
        .id;
    Fixture {
        app: handlers::router(BookingService::new(store)),
        owner,
        booker,
        item,
    }
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_booking(booker_id: i64, item_id: i64) -> Request<Body> {
    let now = Utc::now();
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .header("X-Sharer-User-Id", booker_id.to_string())
        .body(Body::from(
            serde_json::to_string(&json!({
                "itemId": item_id,
                "start": now + Duration::hours(1),
                "end": now + Duration::hours(2)
            }))
            .unwrap(),
        ))
        .unwrap()
}

#[tokio::test]
async fn test_add_booking_handler_returns_waiting_with_summaries() {
    let f = fixture().await;

    let response = f.app.oneshot(post_booking(f.booker, f.item)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(body["status"], "WAITING");
    assert_eq!(body["booker"]["name"], "bob");
    assert_eq!(body["item"]["name"], "drill");
}

#[tokio::test]
async fn test_approve_handler_flips_status_once() {
    let f = fixture().await;

    let created = f
        .app
        .clone()
        .oneshot(post_booking(f.booker, f.item))
        .await
        .unwrap();
    let created: serde_json::Value = json_body(created.into_body()).await;
    let booking_id = created["id"].as_i64().unwrap();

    let approve = |approved: bool| {
        Request::builder()
            .method("PATCH")
            .uri(format!("/{booking_id}?approved={approved}"))
            .header("X-Sharer-User-Id", f.owner.to_string())
            .body(Body::empty())
            .unwrap()
    };

    let response = f.app.clone().oneshot(approve(true)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(body["status"], "APPROVED");

    // Second decision fails even with the opposite flag.
    let response = f.app.oneshot(approve(false)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_approve_handler_hides_bookings_of_others_items() {
    let f = fixture().await;

    let created = f
        .app
        .clone()
        .oneshot(post_booking(f.booker, f.item))
        .await
        .unwrap();
    let created: serde_json::Value = json_body(created.into_body()).await;
    let booking_id = created["id"].as_i64().unwrap();

    let request = Request::builder()
        .method("PATCH")
        .uri(format!("/{booking_id}?approved=true"))
        .header("X-Sharer-User-Id", f.booker.to_string())
        .body(Body::empty())
        .unwrap();

    let response = f.app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_handler_defaults_state_to_all() {
    let f = fixture().await;

    let response = f
        .app
        .clone()
        .oneshot(post_booking(f.booker, f.item))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let request = Request::builder()
        .method("GET")
        .uri("/")
        .header("X-Sharer-User-Id", f.booker.to_string())
        .body(Body::empty())
        .unwrap();

    let response = f.app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bookings: Vec<serde_json::Value> = json_body(response.into_body()).await;
    assert_eq!(bookings.len(), 1);
}

#[tokio::test]
async fn test_list_handler_rejects_unknown_state_with_500() {
    let f = fixture().await;

    let request = Request::builder()
        .method("GET")
        .uri("/?state=SOMEDAY")
        .header("X-Sharer-User-Id", f.booker.to_string())
        .body(Body::empty())
        .unwrap();

    let response = f.app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "Unknown state: SOMEDAY");
}

#[tokio::test]
async fn test_owner_listing_handler_sees_incoming_bookings() {
    let f = fixture().await;

    let response = f
        .app
        .clone()
        .oneshot(post_booking(f.booker, f.item))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let request = Request::builder()
        .method("GET")
        .uri("/owner?state=WAITING")
        .header("X-Sharer-User-Id", f.owner.to_string())
        .body(Body::empty())
        .unwrap();

    let response = f.app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bookings: Vec<serde_json::Value> = json_body(response.into_body()).await;
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["booker"]["id"], f.booker);
}

#[tokio::test]
async fn test_list_handler_rejects_negative_paging() {
    let f = fixture().await;

    let request = Request::builder()
        .method("GET")
        .uri("/?from=-1&size=5")
        .header("X-Sharer-User-Id", f.booker.to_string())
        .body(Body::empty())
        .unwrap();

    let response = f.app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
