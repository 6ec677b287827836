pub mod calendar;
pub mod catalog;
pub mod error;
pub mod http;
pub mod ledger;
pub mod traits;

pub use calendar::CalendarClient;
pub use catalog::CatalogClient;
pub use error::ClientError;
pub use http::build_http_client;
pub use ledger::LedgerClient;
pub use traits::{CalendarApi, CatalogApi, LedgerApi};
