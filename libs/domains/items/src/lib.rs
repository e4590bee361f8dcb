//! Items domain: listings, edits, text search, and after-booking comments.
//!
//! Reads are enriched: every viewer gets the item's comments, and the owner
//! additionally sees the closest finished and upcoming bookings inline.

pub mod error;
pub mod handlers;
pub mod models;
pub mod service;

pub use error::{ItemError, ItemResult};
pub use handlers::ApiDoc;
pub use models::{
    BookingBrief, CommentDto, CreateComment, CreateItem, ItemPatch, ItemWithBookings,
};
pub use service::ItemService;
