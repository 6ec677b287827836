use std::sync::Arc;

use booking_clients::{CalendarApi, CatalogApi, LedgerApi};
use booking_models::{
    BookingRecord, BookingRequest, DateEntry, EnrichedDateEntry, Movie, ShowtimeSlot, User,
};
use tracing::info;

use crate::enrich::enrich_bookings;
use crate::error::{BookingError, Entity};
use crate::users::UserDirectory;
use crate::validate::{parse_rating, today_yyyymmdd, validate_booking};

/// User-facing aggregator over the remote catalog, calendar and ledger.
///
/// Owns the booking write flow (validate, then persist through the ledger)
/// and the read flow (raw record, then reconcile against a catalog
/// snapshot). Remote failures abort an attempt before any state changes.
pub struct BookingService<C, M, L> {
    calendar: C,
    catalog: M,
    ledger: L,
    users: Arc<UserDirectory>,
}

impl<C, M, L> BookingService<C, M, L>
where
    C: CalendarApi,
    M: CatalogApi,
    L: LedgerApi,
{
    pub fn new(calendar: C, catalog: M, ledger: L, users: Arc<UserDirectory>) -> Self {
        Self {
            calendar,
            catalog,
            ledger,
            users,
        }
    }

    pub fn user_directory(&self) -> &UserDirectory {
        &self.users
    }

    /// Confirm the user exists and refresh their activity timestamp.
    async fn authenticate(&self, user_id: &str) -> Result<User, BookingError> {
        let user = self.users.get(user_id).await?;
        self.users.touch(user_id).await?;
        Ok(user)
    }

    pub async fn movies(&self) -> Result<Vec<Movie>, BookingError> {
        let mut movies: Vec<Movie> = self.catalog.list_movies().await?.into_values().collect();
        movies.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(movies)
    }

    pub async fn movie(&self, movie_id: &str) -> Result<Movie, BookingError> {
        self.catalog
            .get_movie(movie_id)
            .await?
            .ok_or(BookingError::NotFound {
                entity: Entity::Movie,
            })
    }

    pub async fn schedule(&self) -> Result<Vec<ShowtimeSlot>, BookingError> {
        let mut slots = self.calendar.list_slots().await?;
        slots.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(slots)
    }

    /// Set a movie's rating on behalf of a user. The rating comes in as the
    /// raw string argument and must be a number in [0, 10].
    pub async fn rate_movie(
        &self,
        user_id: &str,
        movie_id: &str,
        rating: &str,
    ) -> Result<Movie, BookingError> {
        self.authenticate(user_id).await?;
        let rating = parse_rating(rating)?;

        let updated = self
            .catalog
            .update_rating(movie_id, rating)
            .await?
            .ok_or(BookingError::NotFound {
                entity: Entity::Movie,
            })?;

        info!("user {} rated {} at {}", user_id, movie_id, rating);
        Ok(updated)
    }

    /// The booking write flow: validate against calendar, catalog and the
    /// user's current record, then persist through the ledger.
    pub async fn add_booking(
        &self,
        user_id: &str,
        request: &BookingRequest,
    ) -> Result<Vec<DateEntry>, BookingError> {
        self.authenticate(user_id).await?;

        let existing = self
            .ledger
            .bookings_for_user(user_id)
            .await?
            .unwrap_or_default();

        let booking = validate_booking(
            &self.calendar,
            &self.catalog,
            user_id,
            request,
            &existing,
            today_yyyymmdd(),
        )
        .await?;

        let updated = self
            .ledger
            .add_booking(&booking.user_id, &booking.date, &booking.movie_id)
            .await?;

        info!(
            "user {} booked {} on {}",
            user_id, booking.movie_id, booking.date
        );
        Ok(updated)
    }

    /// The booking read flow: the raw record reconciled against a live
    /// catalog snapshot. A user who never booked reads as an empty list.
    pub async fn bookings_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<EnrichedDateEntry>, BookingError> {
        self.authenticate(user_id).await?;

        let raw = self
            .ledger
            .bookings_for_user(user_id)
            .await?
            .unwrap_or_default();
        let snapshot = self.catalog.list_movies().await?;

        Ok(enrich_bookings(&raw, &snapshot))
    }

    pub async fn all_bookings(&self) -> Result<Vec<BookingRecord>, BookingError> {
        Ok(self.ledger.all_bookings().await?)
    }
}
