//! Bookings domain: the WAITING -> APPROVED/REJECTED lifecycle and
//! time-window filtered listings for bookers and item owners.

pub mod error;
pub mod handlers;
pub mod models;
pub mod service;

pub use error::{BookingError, BookingResult};
pub use handlers::ApiDoc;
pub use models::{BookingResponse, BookingState, CreateBooking, ItemSummary, UserSummary};
pub use service::BookingService;
