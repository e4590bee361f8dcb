//! Shared persistence layer for the sharehub services.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Services   │  ← domain crates (users, items, bookings, requests)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │    Store    │  ← data access (trait + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← entities shared by every domain
//! └─────────────┘
//! ```
//!
//! Every domain service talks to the same [`Store`]: a booking has to check
//! the item and the booker, an item view pulls in bookings and comments, a
//! request lists the items answering it. Keeping the entities and the access
//! trait in one crate avoids dependency cycles between the domain crates.
//!
//! [`InMemoryStore`] is the bundled implementation. Ids are assigned by the
//! store, monotonically increasing from 1 with an independent sequence per
//! entity kind; some deployments rely on that contract for stored ids.

pub mod memory;
pub mod models;
pub mod store;

pub use memory::InMemoryStore;
pub use models::{
    Booking, BookingQuery, BookingStatus, Comment, Item, NewBooking, NewComment, NewItem,
    NewRequest, Request, User,
};
pub use store::{Page, Store, StoreError, StoreResult};
