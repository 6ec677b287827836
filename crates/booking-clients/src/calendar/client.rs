use std::time::Duration;

use async_trait::async_trait;
use booking_models::ShowtimeSlot;
use reqwest::Client;

use crate::calendar::api;
use crate::error::ClientError;
use crate::http::build_http_client;
use crate::traits::CalendarApi;

/// HTTP caller for the showtime calendar service.
#[derive(Clone)]
pub struct CalendarClient {
    client: Client,
    base_url: String,
}

impl CalendarClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: build_http_client(timeout),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl CalendarApi for CalendarClient {
    async fn get_slot(&self, date: &str) -> Result<Option<ShowtimeSlot>, ClientError> {
        api::get_slot(&self.client, &self.base_url, date).await
    }

    async fn list_slots(&self) -> Result<Vec<ShowtimeSlot>, ClientError> {
        api::list_slots(&self.client, &self.base_url).await
    }
}
