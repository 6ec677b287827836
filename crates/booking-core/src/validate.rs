use booking_clients::{CalendarApi, CatalogApi};
use booking_models::{BookingRequest, DateEntry, ValidatedBooking};
use chrono::{Datelike, Utc};
use tracing::debug;

use crate::error::{BookingError, FieldError, FieldReason};

/// Current UTC date as an integer YYYYMMDD, the comparison form used by the
/// future-date rule.
pub fn today_yyyymmdd() -> u32 {
    let now = Utc::now();
    now.year() as u32 * 10_000 + now.month() * 100 + now.day()
}

/// YYYYMMDD shape check: 8 ASCII digits, month 01-12, day 01-31.
fn date_format_ok(date: &str) -> bool {
    if date.len() != 8 || !date.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let month: u32 = date[4..6].parse().unwrap_or(0);
    let day: u32 = date[6..8].parse().unwrap_or(0);
    (1..=12).contains(&month) && (1..=31).contains(&day)
}

/// Validate a booking request against the showtime calendar, the movie
/// catalog, and the user's current ledger state.
///
/// Field checks are accumulated and reported together; date checks run
/// before movie checks, and the remote lookup for a field is skipped once
/// that field already failed a stateless check. The duplicate check is the
/// only stateful one and runs last, after every other check passed. Any
/// remote failure aborts the whole attempt as `Upstream`.
pub async fn validate_booking<C, M>(
    calendar: &C,
    catalog: &M,
    user_id: &str,
    request: &BookingRequest,
    existing: &[DateEntry],
    today: u32,
) -> Result<ValidatedBooking, BookingError>
where
    C: CalendarApi + ?Sized,
    M: CatalogApi + ?Sized,
{
    let mut fields = Vec::new();

    let movie_given = !request.movie.trim().is_empty();

    let date_ok = if !date_format_ok(&request.date) {
        fields.push(FieldError::new("date", FieldReason::InvalidDateFormat));
        false
    } else if request.date.parse::<u32>().unwrap_or(0) < today {
        fields.push(FieldError::new("date", FieldReason::DateInPast));
        false
    } else {
        true
    };

    if date_ok {
        match calendar.get_slot(&request.date).await? {
            None => fields.push(FieldError::new("date", FieldReason::DateNotScheduled)),
            Some(slot) => {
                if movie_given && !slot.has_movie(&request.movie) {
                    fields.push(FieldError::new(
                        "movie",
                        FieldReason::MovieNotScheduledThisDate,
                    ));
                }
            }
        }
    }

    if !movie_given {
        fields.push(FieldError::new("movie", FieldReason::MissingMovie));
    } else if catalog.get_movie(&request.movie).await?.is_none() {
        fields.push(FieldError::new("movie", FieldReason::MovieNotFound));
    }

    if !fields.is_empty() {
        debug!(
            "booking rejected for user {}: {} field error(s)",
            user_id,
            fields.len()
        );
        return Err(BookingError::ValidationFailed { fields });
    }

    // Stateful check, only once every stateless check passed.
    let already_booked = existing
        .iter()
        .any(|entry| entry.date == request.date && entry.has_movie(&request.movie));
    if already_booked {
        return Err(BookingError::DuplicateBooking {
            date: request.date.clone(),
            movie_id: request.movie.clone(),
        });
    }

    Ok(ValidatedBooking {
        user_id: user_id.to_string(),
        date: request.date.clone(),
        movie_id: request.movie.clone(),
    })
}

/// Parse a rating argument: a numeric string convertible to a float in
/// [0, 10]. Out-of-range values are a validation error, not a silent clamp.
pub fn parse_rating(raw: &str) -> Result<f32, BookingError> {
    let value: f32 = raw
        .trim()
        .parse()
        .map_err(|_| BookingError::single_field("rating", FieldReason::RatingOutOfRange))?;

    if !value.is_finite() || !(0.0..=10.0).contains(&value) {
        return Err(BookingError::single_field(
            "rating",
            FieldReason::RatingOutOfRange,
        ));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{movie, slot, DownCalendar, FakeCalendar, FakeCatalog};

    const TODAY: u32 = 20240101;

    fn request(date: &str, movie: &str) -> BookingRequest {
        BookingRequest {
            date: date.to_string(),
            movie: movie.to_string(),
        }
    }

    fn scheduled_world() -> (FakeCalendar, FakeCatalog) {
        let calendar = FakeCalendar::new(vec![slot("20240101", &["m1", "m2"])]);
        let catalog = FakeCatalog::new(vec![movie("m1", "X"), movie("m2", "Y")]);
        (calendar, catalog)
    }

    fn field_reasons(err: BookingError) -> Vec<FieldReason> {
        match err {
            BookingError::ValidationFailed { fields } => {
                fields.into_iter().map(|f| f.reason).collect()
            }
            other => panic!("expected ValidationFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rejects_malformed_dates() {
        let (calendar, catalog) = scheduled_world();

        for bad in ["", "2024", "202401012", "2024010a", "20241301", "20240132", "20240001", "20241100"] {
            let err = validate_booking(&calendar, &catalog, "u1", &request(bad, "m1"), &[], TODAY)
                .await
                .unwrap_err();
            assert_eq!(
                field_reasons(err),
                vec![FieldReason::InvalidDateFormat],
                "date {:?} should be malformed",
                bad
            );
        }
    }

    #[tokio::test]
    async fn test_rejects_past_date_even_if_well_formed() {
        let (calendar, catalog) = scheduled_world();

        let err = validate_booking(
            &calendar,
            &catalog,
            "u1",
            &request("20231231", "m1"),
            &[],
            TODAY,
        )
        .await
        .unwrap_err();

        assert_eq!(field_reasons(err), vec![FieldReason::DateInPast]);
    }

    #[tokio::test]
    async fn test_today_is_accepted() {
        let (calendar, catalog) = scheduled_world();

        let booked = validate_booking(
            &calendar,
            &catalog,
            "u1",
            &request("20240101", "m1"),
            &[],
            TODAY,
        )
        .await
        .unwrap();

        assert_eq!(booked.user_id, "u1");
        assert_eq!(booked.date, "20240101");
        assert_eq!(booked.movie_id, "m1");
    }

    #[tokio::test]
    async fn test_accumulates_past_date_and_missing_movie() {
        // Scenario C: one response carrying both field errors.
        let (calendar, catalog) = scheduled_world();

        let err = validate_booking(
            &calendar,
            &catalog,
            "u1",
            &request("20231231", ""),
            &[],
            TODAY,
        )
        .await
        .unwrap_err();

        assert_eq!(
            field_reasons(err),
            vec![FieldReason::DateInPast, FieldReason::MissingMovie]
        );
    }

    #[tokio::test]
    async fn test_unscheduled_date() {
        let (calendar, catalog) = scheduled_world();

        let err = validate_booking(
            &calendar,
            &catalog,
            "u1",
            &request("20240215", "m1"),
            &[],
            TODAY,
        )
        .await
        .unwrap_err();

        assert_eq!(field_reasons(err), vec![FieldReason::DateNotScheduled]);
    }

    #[tokio::test]
    async fn test_movie_not_scheduled_on_that_date() {
        let calendar = FakeCalendar::new(vec![
            slot("20240101", &["m1"]),
            slot("20240202", &["m2"]),
        ]);
        let catalog = FakeCatalog::new(vec![movie("m1", "X"), movie("m2", "Y")]);

        let err = validate_booking(
            &calendar,
            &catalog,
            "u1",
            &request("20240101", "m2"),
            &[],
            TODAY,
        )
        .await
        .unwrap_err();

        assert_eq!(
            field_reasons(err),
            vec![FieldReason::MovieNotScheduledThisDate]
        );
    }

    #[tokio::test]
    async fn test_unknown_movie() {
        let calendar = FakeCalendar::new(vec![slot("20240101", &["m1", "ghost"])]);
        let catalog = FakeCatalog::new(vec![movie("m1", "X")]);

        let err = validate_booking(
            &calendar,
            &catalog,
            "u1",
            &request("20240101", "ghost"),
            &[],
            TODAY,
        )
        .await
        .unwrap_err();

        assert_eq!(field_reasons(err), vec![FieldReason::MovieNotFound]);
    }

    #[tokio::test]
    async fn test_duplicate_booking_for_same_date_and_movie() {
        // Scenario B: repeating an applied booking is a duplicate.
        let (calendar, catalog) = scheduled_world();
        let existing = vec![DateEntry::new("20240101", "m1")];

        let err = validate_booking(
            &calendar,
            &catalog,
            "u1",
            &request("20240101", "m1"),
            &existing,
            TODAY,
        )
        .await
        .unwrap_err();

        match err {
            BookingError::DuplicateBooking { date, movie_id } => {
                assert_eq!(date, "20240101");
                assert_eq!(movie_id, "m1");
            }
            other => panic!("expected DuplicateBooking, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_same_movie_on_another_date_is_permitted() {
        let calendar = FakeCalendar::new(vec![
            slot("20240101", &["m1"]),
            slot("20240202", &["m1"]),
        ]);
        let catalog = FakeCatalog::new(vec![movie("m1", "X")]);
        let existing = vec![DateEntry::new("20240101", "m1")];

        let booked = validate_booking(
            &calendar,
            &catalog,
            "u1",
            &request("20240202", "m1"),
            &existing,
            TODAY,
        )
        .await
        .unwrap();

        assert_eq!(booked.date, "20240202");
    }

    #[tokio::test]
    async fn test_calendar_outage_is_upstream_not_validation() {
        let catalog = FakeCatalog::new(vec![movie("m1", "X")]);

        let err = validate_booking(
            &DownCalendar,
            &catalog,
            "u1",
            &request("20240101", "m1"),
            &[],
            TODAY,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, BookingError::Upstream { .. }));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_parse_rating_accepts_decimals_in_range() {
        assert_eq!(parse_rating("7.5").unwrap(), 7.5);
        assert_eq!(parse_rating("0").unwrap(), 0.0);
        assert_eq!(parse_rating("10").unwrap(), 10.0);
    }

    #[test]
    fn test_parse_rating_rejects_out_of_range_and_garbage() {
        for bad in ["11", "-1", "abc", "", "NaN", "inf"] {
            let err = parse_rating(bad).unwrap_err();
            assert_eq!(
                field_reasons(err),
                vec![FieldReason::RatingOutOfRange],
                "rating {:?} should be rejected",
                bad
            );
        }
    }
}
