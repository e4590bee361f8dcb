//! Health check endpoint

use axum::{routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

/// Create a health check router
pub fn router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Liveness check; the in-memory store has no external dependency to probe
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
