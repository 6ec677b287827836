use std::time::Duration;

use async_trait::async_trait;
use booking_models::{BookingRecord, DateEntry};
use reqwest::Client;

use crate::error::ClientError;
use crate::http::build_http_client;
use crate::ledger::api;
use crate::traits::LedgerApi;

/// HTTP caller for a remote booking ledger service.
#[derive(Clone)]
pub struct LedgerClient {
    client: Client,
    base_url: String,
}

impl LedgerClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: build_http_client(timeout),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl LedgerApi for LedgerClient {
    async fn bookings_for_user(&self, user_id: &str) -> Result<Option<Vec<DateEntry>>, ClientError> {
        api::bookings_for_user(&self.client, &self.base_url, user_id).await
    }

    async fn all_bookings(&self) -> Result<Vec<BookingRecord>, ClientError> {
        api::all_bookings(&self.client, &self.base_url).await
    }

    async fn add_booking(
        &self,
        user_id: &str,
        date: &str,
        movie_id: &str,
    ) -> Result<Vec<DateEntry>, ClientError> {
        api::add_booking(&self.client, &self.base_url, user_id, date, movie_id).await
    }
}
