use booking_models::{BookingRecord, BookingRequest, DateEntry};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::error::ClientError;

pub(crate) const SERVICE: &str = "ledger";

#[derive(Debug, Deserialize)]
struct AddBookingResponse {
    user_bookings: Vec<DateEntry>,
}

/// Fetch one user's booking record. `Ok(None)` for a user who never booked.
pub async fn bookings_for_user(
    client: &Client,
    base_url: &str,
    user_id: &str,
) -> Result<Option<Vec<DateEntry>>, ClientError> {
    let url = format!("{}/bookings/{}", base_url.trim_end_matches('/'), user_id);
    debug!("ledger: fetching bookings for user {}", user_id);

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| ClientError::unavailable(SERVICE, e))?;

    match response.status() {
        StatusCode::OK => {
            let record: BookingRecord = response
                .json()
                .await
                .map_err(|e| ClientError::unavailable(SERVICE, e))?;
            Ok(Some(record.dates))
        }
        StatusCode::NOT_FOUND => Ok(None),
        status if status.is_server_error() => Err(ClientError::unavailable(
            SERVICE,
            format!("status {}", status),
        )),
        status => {
            let detail = response.text().await.unwrap_or_default();
            Err(ClientError::protocol(SERVICE, status.as_u16(), detail))
        }
    }
}

/// Fetch every booking record in the ledger.
pub async fn all_bookings(
    client: &Client,
    base_url: &str,
) -> Result<Vec<BookingRecord>, ClientError> {
    let url = format!("{}/bookings", base_url.trim_end_matches('/'));
    debug!("ledger: fetching all booking records");

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| ClientError::unavailable(SERVICE, e))?;

    match response.status() {
        StatusCode::OK => {
            let records: Vec<BookingRecord> = response
                .json()
                .await
                .map_err(|e| ClientError::unavailable(SERVICE, e))?;
            Ok(records)
        }
        status if status.is_server_error() => Err(ClientError::unavailable(
            SERVICE,
            format!("status {}", status),
        )),
        status => {
            let detail = response.text().await.unwrap_or_default();
            Err(ClientError::protocol(SERVICE, status.as_u16(), detail))
        }
    }
}

/// Append one booking to a user's record. The ledger service applies the
/// booking and persists atomically; the response carries the updated record.
pub async fn add_booking(
    client: &Client,
    base_url: &str,
    user_id: &str,
    date: &str,
    movie_id: &str,
) -> Result<Vec<DateEntry>, ClientError> {
    let url = format!("{}/bookings/{}", base_url.trim_end_matches('/'), user_id);
    debug!(
        "ledger: adding booking for user {} ({} / {})",
        user_id, date, movie_id
    );

    let request = BookingRequest {
        date: date.to_string(),
        movie: movie_id.to_string(),
    };

    let response = client
        .post(&url)
        .json(&request)
        .send()
        .await
        .map_err(|e| ClientError::unavailable(SERVICE, e))?;

    match response.status() {
        StatusCode::OK | StatusCode::CREATED => {
            let added: AddBookingResponse = response
                .json()
                .await
                .map_err(|e| ClientError::unavailable(SERVICE, e))?;
            Ok(added.user_bookings)
        }
        status if status.is_server_error() => Err(ClientError::unavailable(
            SERVICE,
            format!("status {}", status),
        )),
        status => {
            let detail = response.text().await.unwrap_or_default();
            Err(ClientError::protocol(SERVICE, status.as_u16(), detail))
        }
    }
}
