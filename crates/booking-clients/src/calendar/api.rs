use booking_models::ShowtimeSlot;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::error::ClientError;

pub(crate) const SERVICE: &str = "calendar";

#[derive(Debug, Deserialize)]
struct ScheduleResponse {
    schedule: Vec<ShowtimeSlot>,
}

/// Fetch the showtime slot for one date. `Ok(None)` when nothing is
/// scheduled that day.
pub async fn get_slot(
    client: &Client,
    base_url: &str,
    date: &str,
) -> Result<Option<ShowtimeSlot>, ClientError> {
    let url = format!("{}/showtimes/{}", base_url.trim_end_matches('/'), date);
    debug!("calendar: fetching slot for {}", date);

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| ClientError::unavailable(SERVICE, e))?;

    match response.status() {
        StatusCode::OK => {
            let slot: ShowtimeSlot = response
                .json()
                .await
                .map_err(|e| ClientError::unavailable(SERVICE, e))?;
            Ok(Some(slot))
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

/// Fetch the full schedule.
pub async fn list_slots(client: &Client, base_url: &str) -> Result<Vec<ShowtimeSlot>, ClientError> {
    let url = format!("{}/showtimes", base_url.trim_end_matches('/'));
    debug!("calendar: fetching full schedule");

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| ClientError::unavailable(SERVICE, e))?;

    match response.status() {
        StatusCode::OK => {
            let schedule: ScheduleResponse = response
                .json()
                .await
                .map_err(|e| ClientError::unavailable(SERVICE, e))?;
            Ok(schedule.schedule)
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
