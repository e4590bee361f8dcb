use axum_helpers::{PageParams, PageWindow};
use chrono::Utc;
use std::sync::Arc;
use storage::{Booking, BookingStatus, Item, NewBooking, Page, Store, StoreError, User};
use tracing::info;

use crate::error::{BookingError, BookingResult};
use crate::models::{BookingResponse, BookingState, CreateBooking};

fn page(window: Option<PageWindow>) -> Option<Page> {
    window.map(|w| Page {
        offset: w.offset,
        limit: w.limit,
    })
}

/// Business logic for the booking lifecycle and filtered listings.
#[derive(Clone)]
pub struct BookingService<S: Store> {
    store: Arc<S>,
}

impl<S: Store> BookingService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Request a booking. Checks run in a fixed order so that the first
    /// failing one decides the error kind; a new booking is always WAITING.
    pub async fn add_booking(
        &self,
        booker_id: i64,
        input: CreateBooking,
    ) -> BookingResult<BookingResponse> {
        let item = self
            .store
            .find_item(input.item_id)
            .await?
            .ok_or(BookingError::ItemNotFound(input.item_id))?;
        if item.owner_id == booker_id {
            return Err(BookingError::OwnItem);
        }
        let booker = self
            .store
            .find_user(booker_id)
            .await?
            .ok_or(BookingError::UserNotFound(booker_id))?;
        if !item.available {
            return Err(BookingError::Unavailable(item.id));
        }
        let now = Utc::now();
        if input.start < now {
            return Err(BookingError::StartInPast);
        }
        if input.end < now {
            return Err(BookingError::EndInPast);
        }
        if input.start >= input.end {
            return Err(BookingError::StartNotBeforeEnd);
        }

        let booking = self
            .store
            .save_booking(NewBooking {
                start: input.start,
                end: input.end,
                status: BookingStatus::Waiting,
                booker_id,
                item_id: item.id,
            })
            .await?;
        info!(booking_id = booking.id, booker_id, item_id = item.id, "Booking requested");
        Ok(BookingResponse::new(booking, booker, item))
    }

    /// Decide on a waiting booking. Only the item owner may decide, and a
    /// booking that is already approved cannot be decided again.
    pub async fn approve(
        &self,
        owner_id: i64,
        booking_id: i64,
        approved: bool,
    ) -> BookingResult<BookingResponse> {
        let mut booking = self
            .store
            .find_booking(booking_id)
            .await?
            .ok_or(BookingError::BookingNotFound(booking_id))?;
        let item = self.item_of(&booking).await?;
        if item.owner_id != owner_id {
            return Err(BookingError::NotOwner(booking_id));
        }
        if booking.status == BookingStatus::Approved {
            return Err(BookingError::AlreadyApproved(booking_id));
        }

        booking.status = if approved {
            BookingStatus::Approved
        } else {
            BookingStatus::Rejected
        };
        let booking = self.store.update_booking(booking).await?;
        info!(booking_id, owner_id, status = %booking.status, "Booking decided");

        let booker = self.booker_of(&booking).await?;
        Ok(BookingResponse::new(booking, booker, item))
    }

    /// Fetch one booking. Visible only to its booker and the item owner.
    pub async fn get_booking(
        &self,
        user_id: i64,
        booking_id: i64,
    ) -> BookingResult<BookingResponse> {
        let booking = self
            .store
            .find_booking(booking_id)
            .await?
            .ok_or(BookingError::BookingNotFound(booking_id))?;
        let item = self.item_of(&booking).await?;
        if booking.booker_id != user_id && item.owner_id != user_id {
            return Err(BookingError::NotParticipant(booking_id));
        }
        let booker = self.booker_of(&booking).await?;
        Ok(BookingResponse::new(booking, booker, item))
    }

    /// Bookings made by `user_id`, newest start first, narrowed by `state`.
    pub async fn get_user_bookings(
        &self,
        user_id: i64,
        state: BookingState,
        params: PageParams,
    ) -> BookingResult<Vec<BookingResponse>> {
        self.require_user(user_id).await?;
        let window = params.window()?;
        let bookings = self
            .store
            .bookings_by_booker(user_id, state.query(Utc::now()), page(window))
            .await?;
        self.enrich_all(bookings).await
    }

    /// Bookings on items owned by `owner_id`, newest start first, narrowed
    /// by `state`.
    pub async fn get_owner_bookings(
        &self,
        owner_id: i64,
        state: BookingState,
        params: PageParams,
    ) -> BookingResult<Vec<BookingResponse>> {
        self.require_user(owner_id).await?;
        let window = params.window()?;
        let bookings = self
            .store
            .bookings_by_owner(owner_id, state.query(Utc::now()), page(window))
            .await?;
        self.enrich_all(bookings).await
    }

    async fn require_user(&self, user_id: i64) -> BookingResult<()> {
        self.store
            .find_user(user_id)
            .await?
            .map(|_| ())
            .ok_or(BookingError::UserNotFound(user_id))
    }

    async fn item_of(&self, booking: &Booking) -> BookingResult<Item> {
        Ok(self
            .store
            .find_item(booking.item_id)
            .await?
            .ok_or(StoreError::RowVanished("item"))?)
    }

    async fn booker_of(&self, booking: &Booking) -> BookingResult<User> {
        Ok(self
            .store
            .find_user(booking.booker_id)
            .await?
            .ok_or(StoreError::RowVanished("user"))?)
    }

    async fn enrich_all(&self, bookings: Vec<Booking>) -> BookingResult<Vec<BookingResponse>> {
        let mut responses = Vec::with_capacity(bookings.len());
        for booking in bookings {
            let item = self.item_of(&booking).await?;
            let booker = self.booker_of(&booking).await?;
            responses.push(BookingResponse::new(booking, booker, item));
        }
        Ok(responses)
    }
}
