use std::collections::HashMap;

use async_trait::async_trait;
use booking_models::{BookingRecord, DateEntry, Movie, ShowtimeSlot};

use crate::error::ClientError;

/// Movie catalog lookups.
///
/// A missing movie is `Ok(None)`; `Err` always means the catalog itself
/// could not answer.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn get_movie(&self, id: &str) -> Result<Option<Movie>, ClientError>;

    /// Full catalog snapshot keyed by movie id, used by the enrichment pass.
    async fn list_movies(&self) -> Result<HashMap<String, Movie>, ClientError>;

    /// Set a movie's rating. The caller has already validated the range.
    async fn update_rating(&self, id: &str, rating: f32) -> Result<Option<Movie>, ClientError>;
}

/// Showtime calendar lookups: what is playing when.
#[async_trait]
pub trait CalendarApi: Send + Sync {
    async fn get_slot(&self, date: &str) -> Result<Option<ShowtimeSlot>, ClientError>;

    async fn list_slots(&self) -> Result<Vec<ShowtimeSlot>, ClientError>;
}

/// Booking ledger: the per-user `date -> movies` records.
///
/// `add_booking` is atomic from the caller's perspective: the implementation
/// serializes writers per user and upholds the one-entry-per-date and
/// one-movie-per-entry invariants (the append is idempotent).
#[async_trait]
pub trait LedgerApi: Send + Sync {
    /// `Ok(None)` for a user who has never booked.
    async fn bookings_for_user(&self, user_id: &str) -> Result<Option<Vec<DateEntry>>, ClientError>;

    async fn all_bookings(&self) -> Result<Vec<BookingRecord>, ClientError>;

    async fn add_booking(
        &self,
        user_id: &str,
        date: &str,
        movie_id: &str,
    ) -> Result<Vec<DateEntry>, ClientError>;
}

// Boxed ledgers delegate, so callers can pick the embedded or the remote
// implementation at runtime.
#[async_trait]
impl<T: LedgerApi + ?Sized> LedgerApi for Box<T> {
    async fn bookings_for_user(&self, user_id: &str) -> Result<Option<Vec<DateEntry>>, ClientError> {
        (**self).bookings_for_user(user_id).await
    }

    async fn all_bookings(&self) -> Result<Vec<BookingRecord>, ClientError> {
        (**self).all_bookings().await
    }

    async fn add_booking(
        &self,
        user_id: &str,
        date: &str,
        movie_id: &str,
    ) -> Result<Vec<DateEntry>, ClientError> {
        (**self).add_booking(user_id, date, movie_id).await
    }
}
