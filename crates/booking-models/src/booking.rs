use serde::{Deserialize, Serialize};

use crate::movie::MovieRef;

/// Per-user record binding one calendar date to the movies booked for it.
///
/// Invariants upheld by the booking core: at most one entry per distinct
/// date per user, and a movie id appears at most once within one entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DateEntry {
    pub date: String, // YYYYMMDD
    pub movies: Vec<String>,
}

impl DateEntry {
    pub fn new(date: impl Into<String>, movie_id: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            movies: vec![movie_id.into()],
        }
    }

    pub fn has_movie(&self, movie_id: &str) -> bool {
        self.movies.iter().any(|id| id == movie_id)
    }
}

/// One ledger entry per user who has ever booked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingRecord {
    #[serde(rename = "userid")]
    pub user_id: String,
    pub dates: Vec<DateEntry>,
}

/// Enriched counterpart of [`DateEntry`]: raw movie ids replaced by
/// [`MovieRef`] values after a reconciliation pass against the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichedDateEntry {
    pub date: String,
    pub movies: Vec<MovieRef>,
}

/// Wire shape of a booking write request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingRequest {
    pub date: String,
    pub movie: String,
}

/// A booking that passed every validation check and is ready to be applied
/// to the ledger. Only the validation engine produces these.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ValidatedBooking {
    pub user_id: String,
    pub date: String,
    pub movie_id: String,
}
