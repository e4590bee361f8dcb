//! # Axum Helpers
//!
//! Shared utilities for the sharehub HTTP services.
//!
//! ## Modules
//!
//! - **[`errors`]**: the three error kinds of the API and their wire format
//!   (`{ "error": "<message>" }`)
//! - **[`extractors`]**: caller identity header (`X-Sharer-User-Id`) and
//!   validated JSON bodies
//! - **[`pagination`]**: the `from`/`size` windowing contract shared by every
//!   listing endpoint
//! - **[`server`]**: server bootstrap with graceful shutdown

pub mod errors;
pub mod extractors;
pub mod pagination;
pub mod server;

pub use errors::{AppError, ErrorResponse};
pub use extractors::{SharerId, ValidatedJson, SHARER_USER_ID_HEADER};
pub use pagination::{PageParams, PageParamsError, PageWindow};
pub use server::{create_app, shutdown_signal};
