//! Integration tests driving the gateway against a live server router.
//!
//! The server is spawned on an ephemeral port; the gateway router is then
//! exercised with oneshot requests and must echo the server's verdicts while
//! rejecting malformed shapes before they ever reach the wire.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::json;
use std::sync::Arc;
use storage::InMemoryStore;
use tower::ServiceExt;

use domain_bookings::BookingService;
use domain_items::ItemService;
use domain_requests::RequestService;
use domain_users::UserService;
use sharehub_gateway::api;
use sharehub_gateway::client::ForwardClient;

fn server_router(store: Arc<InMemoryStore>) -> Router {
    Router::new()
        .nest(
            "/users",
            domain_users::handlers::router(UserService::new(Arc::clone(&store))),
        )
        .nest(
            "/items",
            domain_items::handlers::router(ItemService::new(Arc::clone(&store))),
        )
        .nest(
            "/bookings",
            domain_bookings::handlers::router(BookingService::new(Arc::clone(&store))),
        )
        .nest(
            "/requests",
            domain_requests::handlers::router(RequestService::new(store)),
        )
}

/// Serve the backend on an ephemeral port and return a gateway router
/// forwarding to it.
async fn gateway() -> Router {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let backend = server_router(Arc::new(InMemoryStore::new()));
    tokio::spawn(async move {
        axum::serve(listener, backend.into_make_service())
            .await
            .unwrap();
    });
    api::routes(ForwardClient::new(format!("http://{addr}")))
}

async fn json_body(body: Body) -> serde_json::Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, user_id: Option<i64>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(user_id) = user_id {
        builder = builder.header("X-Sharer-User-Id", user_id.to_string());
    }
    builder
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn test_gateway_forwards_user_creation_and_echoes_conflicts() {
    let app = gateway().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/users",
            None,
            json!({ "name": "alice", "email": "alice@example.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let user = json_body(response.into_body()).await;
    assert_eq!(user["id"], 1);

    // The duplicate-email verdict comes from the server and is echoed as-is.
    let response = app
        .oneshot(post_json(
            "/users",
            None,
            json!({ "name": "bob", "email": "alice@example.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "user with this email is already registered");
}

#[tokio::test]
async fn test_gateway_rejects_malformed_email_without_forwarding() {
    let app = gateway().await;

    let response = app
        .oneshot(post_json(
            "/users",
            None,
            json!({ "name": "alice", "email": "not-an-email" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_gateway_rejects_blank_item_name() {
    let app = gateway().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/users",
            None,
            json!({ "name": "alice", "email": "alice@example.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(post_json(
            "/items",
            Some(1),
            json!({ "name": "", "description": "cordless drill", "available": true }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_gateway_applies_listing_defaults_end_to_end() {
    let app = gateway().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/users",
            None,
            json!({ "name": "alice", "email": "alice@example.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // No state/from/size given; the gateway fills state=ALL, from=0, size=10.
    let request = Request::builder()
        .method("GET")
        .uri("/bookings")
        .header("X-Sharer-User-Id", "1")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_gateway_rejects_bad_paging_before_forwarding() {
    let app = gateway().await;

    let request = Request::builder()
        .method("GET")
        .uri("/requests/all?from=-1&size=10")
        .header("X-Sharer-User-Id", "1")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_gateway_full_booking_round_trip() {
    let app = gateway().await;

    for (name, email) in [("alice", "alice@example.com"), ("bob", "bob@example.com")] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/users",
                None,
                json!({ "name": name, "email": email }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(post_json(
            "/items",
            Some(1),
            json!({ "name": "drill", "description": "cordless drill", "available": true }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let now = chrono::Utc::now();
    let response = app
        .clone()
        .oneshot(post_json(
            "/bookings",
            Some(2),
            json!({
                "itemId": 1,
                "start": now + chrono::Duration::hours(1),
                "end": now + chrono::Duration::hours(2)
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let booking = json_body(response.into_body()).await;
    assert_eq!(booking["status"], "WAITING");

    let request = Request::builder()
        .method("PATCH")
        .uri(format!("/bookings/{}?approved=true", booking["id"]))
        .header("X-Sharer-User-Id", "1")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let decided = json_body(response.into_body()).await;
    assert_eq!(decided["status"], "APPROVED");
}
