//! ShareHub gateway: validates request shapes and forwards to the server.
//!
//! Exposed as a library so integration tests can drive the router directly.

pub mod api;
pub mod client;
pub mod config;
