//! Thin forwarding client: the gateway never interprets server responses,
//! it echoes status and body verbatim.

use axum::body::Body;
use axum::http::{header, Response, StatusCode};
use axum_helpers::{AppError, SHARER_USER_ID_HEADER};
use reqwest::Method;
use serde::Serialize;
use tracing::debug;

#[derive(Clone)]
pub struct ForwardClient {
    http: reqwest::Client,
    base_url: String,
}

impl ForwardClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Forward a request to the server, carrying the caller identity header
    /// through, and echo whatever comes back.
    pub async fn forward<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        user_id: Option<i64>,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<Response<Body>, AppError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "Forwarding request");

        let mut request = self.http.request(method, &url).query(query);
        if let Some(user_id) = user_id {
            request = request.header(SHARER_USER_ID_HEADER, user_id.to_string());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let upstream = request
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Upstream request failed: {e}")))?;

        let status = StatusCode::from_u16(upstream.status().as_u16())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let content_type = upstream
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let bytes = upstream
            .bytes()
            .await
            .map_err(|e| AppError::Internal(format!("Upstream body read failed: {e}")))?;

        let mut response = Response::builder().status(status);
        if let Some(content_type) = content_type {
            response = response.header(header::CONTENT_TYPE, content_type);
        }
        response
            .body(Body::from(bytes))
            .map_err(|e| AppError::Internal(format!("Response assembly failed: {e}")))
    }
}

/// Body type for forwarded requests that carry none.
#[derive(Serialize)]
pub struct NoBody;

pub const NO_BODY: Option<&NoBody> = None;
