//! Users domain: registration, lookup, partial updates, deletion.
//!
//! The one business rule here is email uniqueness, enforced by the store on
//! both registration and update.

pub mod error;
pub mod handlers;
pub mod models;
pub mod service;

pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{CreateUser, UserPatch};
pub use service::UserService;
