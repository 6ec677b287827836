pub mod booking;
pub mod movie;
pub mod showtime;
pub mod user;

pub use booking::{BookingRecord, BookingRequest, DateEntry, EnrichedDateEntry, ValidatedBooking};
pub use movie::{Movie, MovieRef};
pub use showtime::ShowtimeSlot;
pub use user::User;
