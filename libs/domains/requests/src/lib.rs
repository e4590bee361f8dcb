//! Requests domain: posted needs for items and the listings answering them.

pub mod error;
pub mod handlers;
pub mod models;
pub mod service;

pub use error::{RequestError, RequestResult};
pub use handlers::ApiDoc;
pub use models::{CreateRequest, RequestDto};
pub use service::RequestService;
