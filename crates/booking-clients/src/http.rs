use std::time::Duration;

use reqwest::Client;

/// Build the reqwest client shared by one remote caller.
///
/// Every request carries the configured timeout so a hanging dependency
/// aborts the whole attempt instead of stalling a booking mid-flight.
pub fn build_http_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(5)))
        .build()
        .unwrap_or_else(|_| Client::new())
}
