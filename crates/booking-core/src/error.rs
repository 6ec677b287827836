use std::fmt;

use booking_clients::ClientError;
use thiserror::Error;

/// Entity classes a lookup can miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    User,
    Movie,
    Showtime,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::User => write!(f, "user"),
            Entity::Movie => write!(f, "movie"),
            Entity::Showtime => write!(f, "showtime"),
        }
    }
}

/// Why a single request field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldReason {
    InvalidDateFormat,
    DateInPast,
    DateNotScheduled,
    MovieNotScheduledThisDate,
    MissingMovie,
    MovieNotFound,
    MissingName,
    RatingOutOfRange,
}

impl FieldReason {
    /// User-facing text, kept close to what the services answer on the wire.
    pub fn message(&self) -> &'static str {
        match self {
            FieldReason::InvalidDateFormat => "date must be in the format YYYYMMDD",
            FieldReason::DateInPast => "date must be in the future",
            FieldReason::DateNotScheduled => "no showtime scheduled for this date",
            FieldReason::MovieNotScheduledThisDate => "movie not scheduled for this date",
            FieldReason::MissingMovie => "movie must not be empty",
            FieldReason::MovieNotFound => "movie not found",
            FieldReason::MissingName => "display name must not be empty",
            FieldReason::RatingOutOfRange => "rating must be a number between 0 and 10",
        }
    }
}

/// One rejected field of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub reason: FieldReason,
}

impl FieldError {
    pub fn new(field: &'static str, reason: FieldReason) -> Self {
        Self { field, reason }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason.message())
    }
}

/// Domain error taxonomy for the booking core.
///
/// Local validation failures are accumulated and returned together; remote
/// failures other than a well-formed "not found" become `Upstream` and abort
/// the attempt (retryable, never conflated with a missing entity).
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("malformed request: {0}")]
    Malformed(String),

    #[error("validation failed on {} field(s)", .fields.len())]
    ValidationFailed { fields: Vec<FieldError> },

    #[error("{entity} not found")]
    NotFound { entity: Entity },

    #[error("movie {movie_id} already booked for {date}")]
    DuplicateBooking { date: String, movie_id: String },

    #[error("upstream failure: {source}")]
    Upstream {
        #[from]
        source: ClientError,
    },

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("storage failure: {0}")]
    Store(String),
}

impl BookingError {
    pub fn not_found(entity: Entity) -> Self {
        Self::NotFound { entity }
    }

    pub fn single_field(field: &'static str, reason: FieldReason) -> Self {
        Self::ValidationFailed {
            fields: vec![FieldError::new(field, reason)],
        }
    }

    pub fn store(err: impl fmt::Display) -> Self {
        Self::Store(err.to_string())
    }

    /// HTTP-equivalent classification of this error.
    pub fn http_status(&self) -> u16 {
        match self {
            BookingError::Malformed(_) => 400,
            BookingError::ValidationFailed { .. } => 400,
            BookingError::DuplicateBooking { .. } => 400,
            BookingError::NotFound { .. } => 404,
            BookingError::Conflict(_) => 409,
            BookingError::Store(_) => 500,
            BookingError::Upstream { .. } => 502,
        }
    }

    /// Whether retrying the same request later can succeed without changes.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BookingError::Upstream { .. } | BookingError::Store(_))
    }
}
