use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use booking_clients::{ClientError, LedgerApi};
use booking_models::{BookingRecord, DateEntry, ValidatedBooking};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::apply::apply_booking;

const SERVICE: &str = "ledger";

/// On-disk shape, matching the service's bookings.json data file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct LedgerFile {
    bookings: Vec<BookingRecord>,
}

/// Embedded booking ledger: the store owning the per-user `date -> movies`
/// records, exposed only through the [`LedgerApi`] trait so embedded and
/// remote ledgers are interchangeable.
///
/// Writers are serialized per user (at most one writer at a time per user);
/// the whole read-modify-write of `add_booking` runs under that user's lock,
/// which is what upholds the one-entry-per-date invariant under concurrent
/// bookings. Bookings for different users do not contend.
pub struct LedgerStore {
    path: Option<PathBuf>,
    records: RwLock<HashMap<String, Vec<DateEntry>>>,
    user_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
    save_lock: Mutex<()>,
}

impl LedgerStore {
    /// Open a file-backed ledger, starting empty when the file does not
    /// exist yet.
    pub fn open(path: PathBuf) -> Result<Self> {
        let records = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let file: LedgerFile = serde_json::from_str(&content)?;
            let loaded: HashMap<String, Vec<DateEntry>> = file
                .bookings
                .into_iter()
                .map(|record| (record.user_id, record.dates))
                .collect();
            info!("loaded booking ledger: {} user record(s)", loaded.len());
            loaded
        } else {
            debug!("ledger file does not exist, starting empty");
            HashMap::new()
        };

        Ok(Self {
            path: Some(path),
            records: RwLock::new(records),
            user_locks: Mutex::new(HashMap::new()),
            save_lock: Mutex::new(()),
        })
    }

    /// Purely in-memory ledger, used by tests and embedded setups that do
    /// not need persistence.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            records: RwLock::new(HashMap::new()),
            user_locks: Mutex::new(HashMap::new()),
            save_lock: Mutex::new(()),
        }
    }

    async fn user_lock(&self, user_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.user_locks.lock().await;
        locks
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    async fn snapshot(&self) -> Vec<BookingRecord> {
        let records = self.records.read().await;
        let mut bookings: Vec<BookingRecord> = records
            .iter()
            .map(|(user_id, dates)| BookingRecord {
                user_id: user_id.clone(),
                dates: dates.clone(),
            })
            .collect();
        bookings.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        bookings
    }

    async fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let _save = self.save_lock.lock().await;
        let file = LedgerFile {
            bookings: self.snapshot().await,
        };
        let content = serde_json::to_string_pretty(&file)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Atomic write: write to temp file, then rename
        let temp_path = path.with_extension("tmp");
        std::fs::write(&temp_path, content)?;
        std::fs::rename(&temp_path, path)?;
        Ok(())
    }
}

#[async_trait]
impl LedgerApi for LedgerStore {
    async fn bookings_for_user(&self, user_id: &str) -> Result<Option<Vec<DateEntry>>, ClientError> {
        Ok(self.records.read().await.get(user_id).cloned())
    }

    async fn all_bookings(&self) -> Result<Vec<BookingRecord>, ClientError> {
        Ok(self.snapshot().await)
    }

    async fn add_booking(
        &self,
        user_id: &str,
        date: &str,
        movie_id: &str,
    ) -> Result<Vec<DateEntry>, ClientError> {
        let lock = self.user_lock(user_id).await;
        let _writer = lock.lock().await;

        let booking = ValidatedBooking {
            user_id: user_id.to_string(),
            date: date.to_string(),
            movie_id: movie_id.to_string(),
        };

        let updated = {
            let mut records = self.records.write().await;
            let current = records.get(user_id).cloned().unwrap_or_default();
            let updated = apply_booking(&current, &booking);
            records.insert(user_id.to_string(), updated.clone());
            updated
        };

        self.persist()
            .await
            .map_err(|e| ClientError::unavailable(SERVICE, e))?;

        info!(
            "ledger: booked {} on {} for user {}",
            movie_id, date, user_id
        );
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_user_has_no_record() {
        let store = LedgerStore::in_memory();
        assert!(store.bookings_for_user("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_add_creates_record_lazily() {
        let store = LedgerStore::in_memory();

        let dates = store.add_booking("u1", "20260101", "m1").await.unwrap();

        assert_eq!(dates, vec![DateEntry::new("20260101", "m1")]);
        assert_eq!(
            store.bookings_for_user("u1").await.unwrap(),
            Some(vec![DateEntry::new("20260101", "m1")])
        );
    }

    #[tokio::test]
    async fn test_repeated_add_is_idempotent() {
        let store = LedgerStore::in_memory();

        store.add_booking("u1", "20260101", "m1").await.unwrap();
        let dates = store.add_booking("u1", "20260101", "m1").await.unwrap();

        assert_eq!(dates.len(), 1);
        assert_eq!(dates[0].movies, vec!["m1"]);
    }

    #[tokio::test]
    async fn test_concurrent_bookings_same_user_same_new_date() {
        // The lost-update race: both writers see no entry for the date and
        // would each create one without per-user serialization.
        let store = Arc::new(LedgerStore::in_memory());

        let a = {
            let store = store.clone();
            tokio::spawn(async move { store.add_booking("u1", "20260101", "m1").await })
        };
        let b = {
            let store = store.clone();
            tokio::spawn(async move { store.add_booking("u1", "20260101", "m2").await })
        };
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        let dates = store.bookings_for_user("u1").await.unwrap().unwrap();
        assert_eq!(dates.len(), 1);
        assert_eq!(dates[0].date, "20260101");
        let mut movies = dates[0].movies.clone();
        movies.sort();
        assert_eq!(movies, vec!["m1", "m2"]);
    }

    #[tokio::test]
    async fn test_different_users_do_not_share_records() {
        let store = LedgerStore::in_memory();

        store.add_booking("u1", "20260101", "m1").await.unwrap();
        store.add_booking("u2", "20260101", "m2").await.unwrap();

        let all = store.all_bookings().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].user_id, "u1");
        assert_eq!(all[1].user_id, "u2");
    }

    #[tokio::test]
    async fn test_persistence_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookings.json");

        {
            let store = LedgerStore::open(path.clone()).unwrap();
            store.add_booking("u1", "20260101", "m1").await.unwrap();
            store.add_booking("u1", "20260202", "m2").await.unwrap();
        }

        let reopened = LedgerStore::open(path).unwrap();
        let dates = reopened.bookings_for_user("u1").await.unwrap().unwrap();
        assert_eq!(dates.len(), 2);
    }

    #[tokio::test]
    async fn test_open_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LedgerStore::open(dir.path().join("bookings.json")).unwrap();
        assert!(store.all_bookings().await.unwrap().is_empty());
    }
}
