pub mod book;
pub mod config;
pub mod movies;
pub mod user;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use booking_clients::{CalendarClient, CatalogClient, LedgerApi, LedgerClient};
use booking_config::{Config, PathManager};
use booking_core::{BookingError, BookingService, LedgerStore, UserDirectory};
use color_eyre::eyre::eyre;
use color_eyre::Result;

pub(crate) type Service = BookingService<CalendarClient, CatalogClient, Box<dyn LedgerApi>>;

pub(crate) fn load_config(override_path: Option<&PathBuf>) -> Result<Config> {
    let path = match override_path {
        Some(path) => path.clone(),
        None => PathManager::default().config_file(),
    };
    Config::load(&path)
        .map_err(|e| eyre!("Failed to load config from {}: {}", path.display(), e))
}

/// Wire config into a ready-to-use booking service: HTTP callers for the
/// catalog and calendar, and either the remote ledger client or the
/// embedded file-backed store.
pub(crate) fn build_service(config: &Config) -> Result<Service> {
    let timeout = Duration::from_secs(config.http.timeout_secs);

    let calendar = CalendarClient::new(config.calendar.base_url.clone(), timeout);
    let catalog = CatalogClient::new(config.catalog.base_url.clone(), timeout);

    let (users_file, bookings_file) = match &config.storage.data_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            (dir.join("users.json"), dir.join("bookings.json"))
        }
        None => {
            let paths = PathManager::default();
            paths
                .ensure_directories()
                .map_err(|e| eyre!("Failed to create data directories: {}", e))?;
            (paths.users_file(), paths.bookings_file())
        }
    };

    let ledger: Box<dyn LedgerApi> = match &config.ledger {
        Some(endpoint) => {
            tracing::debug!("using remote ledger at {}", endpoint.base_url);
            Box::new(LedgerClient::new(endpoint.base_url.clone(), timeout))
        }
        None => {
            tracing::debug!("using embedded ledger at {}", bookings_file.display());
            Box::new(
                LedgerStore::open(bookings_file)
                    .map_err(|e| eyre!("Failed to open booking ledger: {}", e))?,
            )
        }
    };

    let users = Arc::new(
        UserDirectory::open(users_file)
            .map_err(|e| eyre!("Failed to open user directory: {}", e))?,
    );

    Ok(BookingService::new(calendar, catalog, ledger, users))
}

/// One-line rendering of a domain error, with every rejected field listed.
pub(crate) fn describe(err: &BookingError) -> String {
    match err {
        BookingError::ValidationFailed { fields } => {
            let details: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
            format!("invalid request: {}", details.join("; "))
        }
        other => other.to_string(),
    }
}

pub(crate) fn fail(err: BookingError) -> color_eyre::Report {
    eyre!("{}", describe(&err))
}
