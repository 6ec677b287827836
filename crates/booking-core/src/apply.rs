use booking_models::{DateEntry, ValidatedBooking};

/// Apply a validated booking to a user's `date -> movies` list.
///
/// Pure function, no I/O. An entry for the booking's date gets the movie id
/// appended unless it is already present (idempotent append); a missing
/// entry is created at the end of the list. Pre-existing entries are never
/// dropped or reordered.
pub fn apply_booking(dates: &[DateEntry], booking: &ValidatedBooking) -> Vec<DateEntry> {
    let mut updated = dates.to_vec();

    match updated.iter_mut().find(|entry| entry.date == booking.date) {
        Some(entry) => {
            if !entry.has_movie(&booking.movie_id) {
                entry.movies.push(booking.movie_id.clone());
            }
        }
        None => updated.push(DateEntry::new(&booking.date, &booking.movie_id)),
    }

    updated
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(date: &str, movie_id: &str) -> ValidatedBooking {
        ValidatedBooking {
            user_id: "u1".to_string(),
            date: date.to_string(),
            movie_id: movie_id.to_string(),
        }
    }

    #[test]
    fn test_creates_entry_for_new_date() {
        let dates = vec![DateEntry::new("20260101", "m1")];

        let updated = apply_booking(&dates, &booking("20260202", "m2"));

        assert_eq!(updated.len(), 2);
        assert_eq!(updated[0], dates[0]);
        assert_eq!(updated[1], DateEntry::new("20260202", "m2"));
    }

    #[test]
    fn test_appends_to_existing_date() {
        let dates = vec![
            DateEntry::new("20260101", "m1"),
            DateEntry::new("20260202", "m2"),
        ];

        let updated = apply_booking(&dates, &booking("20260101", "m3"));

        assert_eq!(updated.len(), 2);
        assert_eq!(updated[0].movies, vec!["m1", "m3"]);
        assert_eq!(updated[1], dates[1]);
    }

    #[test]
    fn test_idempotent_append() {
        let dates = vec![DateEntry::new("20260101", "m1")];

        let once = apply_booking(&dates, &booking("20260101", "m1"));
        let twice = apply_booking(&once, &booking("20260101", "m1"));

        assert_eq!(once, twice);
        assert_eq!(twice[0].movies, vec!["m1"]);
    }

    #[test]
    fn test_empty_list() {
        let updated = apply_booking(&[], &booking("20260101", "m1"));

        assert_eq!(updated, vec![DateEntry::new("20260101", "m1")]);
    }

    #[test]
    fn test_untouched_entries_keep_their_order() {
        let dates = vec![
            DateEntry::new("20260303", "m3"),
            DateEntry::new("20260101", "m1"),
            DateEntry::new("20260202", "m2"),
        ];

        let updated = apply_booking(&dates, &booking("20260101", "m9"));

        let order: Vec<&str> = updated.iter().map(|e| e.date.as_str()).collect();
        assert_eq!(order, vec!["20260303", "20260101", "20260202"]);
    }
}
