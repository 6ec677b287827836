use std::path::PathBuf;

use anyhow::Result;
use booking_models::User;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{BookingError, Entity, FieldReason};

/// On-disk shape, matching the service's users.json data file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct UsersFile {
    users: Vec<User>,
}

/// File-backed user directory.
///
/// Registration order is preserved; `last_active` is refreshed on every
/// authenticated action through [`UserDirectory::touch`].
pub struct UserDirectory {
    path: Option<PathBuf>,
    users: RwLock<Vec<User>>,
    save_lock: Mutex<()>,
}

impl UserDirectory {
    pub fn open(path: PathBuf) -> Result<Self> {
        let users = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let file: UsersFile = serde_json::from_str(&content)?;
            info!("loaded user directory: {} user(s)", file.users.len());
            file.users
        } else {
            debug!("users file does not exist, starting empty");
            Vec::new()
        };

        Ok(Self {
            path: Some(path),
            users: RwLock::new(users),
            save_lock: Mutex::new(()),
        })
    }

    pub fn in_memory() -> Self {
        Self {
            path: None,
            users: RwLock::new(Vec::new()),
            save_lock: Mutex::new(()),
        }
    }

    async fn persist(&self) -> Result<(), BookingError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let _save = self.save_lock.lock().await;
        let file = UsersFile {
            users: self.users.read().await.clone(),
        };
        let content = serde_json::to_string_pretty(&file).map_err(BookingError::store)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(BookingError::store)?;
        }

        let temp_path = path.with_extension("tmp");
        std::fs::write(&temp_path, content).map_err(BookingError::store)?;
        std::fs::rename(&temp_path, path).map_err(BookingError::store)?;
        Ok(())
    }

    /// Register a new user under a server-generated id.
    pub async fn register(&self, display_name: &str) -> Result<User, BookingError> {
        let display_name = display_name.trim();
        if display_name.is_empty() {
            return Err(BookingError::single_field(
                "display_name",
                FieldReason::MissingName,
            ));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            display_name: display_name.to_string(),
            last_active: Utc::now().timestamp(),
        };

        {
            let mut users = self.users.write().await;
            // Random ids make a collision operationally near-impossible, but
            // a duplicate must never overwrite an existing user.
            if users.iter().any(|u| u.id == user.id) {
                return Err(BookingError::Conflict(format!(
                    "user id {} already exists",
                    user.id
                )));
            }
            users.push(user.clone());
        }

        self.persist().await?;
        info!("registered user {} ({})", user.display_name, user.id);
        Ok(user)
    }

    pub async fn get(&self, user_id: &str) -> Result<User, BookingError> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
            .ok_or(BookingError::NotFound {
                entity: Entity::User,
            })
    }

    pub async fn list(&self) -> Vec<User> {
        self.users.read().await.clone()
    }

    pub async fn rename(&self, user_id: &str, display_name: &str) -> Result<User, BookingError> {
        let display_name = display_name.trim();
        if display_name.is_empty() {
            return Err(BookingError::single_field(
                "display_name",
                FieldReason::MissingName,
            ));
        }

        let renamed = {
            let mut users = self.users.write().await;
            let user = users
                .iter_mut()
                .find(|u| u.id == user_id)
                .ok_or(BookingError::NotFound {
                    entity: Entity::User,
                })?;
            user.display_name = display_name.to_string();
            user.last_active = Utc::now().timestamp();
            user.clone()
        };

        self.persist().await?;
        Ok(renamed)
    }

    pub async fn remove(&self, user_id: &str) -> Result<(), BookingError> {
        {
            let mut users = self.users.write().await;
            let before = users.len();
            users.retain(|u| u.id != user_id);
            if users.len() == before {
                return Err(BookingError::NotFound {
                    entity: Entity::User,
                });
            }
        }

        self.persist().await?;
        info!("removed user {}", user_id);
        Ok(())
    }

    /// Refresh `last_active`. A no-op for unknown users: the caller decides
    /// whether a missing user is an error.
    pub async fn touch(&self, user_id: &str) -> Result<(), BookingError> {
        let touched = {
            let mut users = self.users.write().await;
            match users.iter_mut().find(|u| u.id == user_id) {
                Some(user) => {
                    user.last_active = Utc::now().timestamp();
                    true
                }
                None => false,
            }
        };

        if touched {
            self.persist().await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_and_get() {
        let directory = UserDirectory::in_memory();

        let user = directory.register("Ada Lovelace").await.unwrap();
        assert!(!user.id.is_empty());

        let fetched = directory.get(&user.id).await.unwrap();
        assert_eq!(fetched.display_name, "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_register_rejects_blank_name() {
        let directory = UserDirectory::in_memory();

        for bad in ["", "   "] {
            let err = directory.register(bad).await.unwrap_err();
            assert!(matches!(err, BookingError::ValidationFailed { .. }));
        }
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let directory = UserDirectory::in_memory();

        let a = directory.register("A").await.unwrap();
        let b = directory.register("B").await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_get_unknown_user() {
        let directory = UserDirectory::in_memory();
        let err = directory.get("ghost").await.unwrap_err();
        assert!(matches!(
            err,
            BookingError::NotFound {
                entity: Entity::User
            }
        ));
        assert_eq!(err.http_status(), 404);
    }

    #[tokio::test]
    async fn test_rename() {
        let directory = UserDirectory::in_memory();
        let user = directory.register("Before").await.unwrap();

        let renamed = directory.rename(&user.id, "After").await.unwrap();
        assert_eq!(renamed.display_name, "After");
        assert!(renamed.last_active >= user.last_active);

        let fetched = directory.get(&user.id).await.unwrap();
        assert_eq!(fetched.display_name, "After");
    }

    #[tokio::test]
    async fn test_remove_then_get_is_not_found() {
        let directory = UserDirectory::in_memory();
        let user = directory.register("Gone Soon").await.unwrap();

        directory.remove(&user.id).await.unwrap();
        assert!(directory.get(&user.id).await.is_err());
        assert!(directory.remove(&user.id).await.is_err());
    }

    #[tokio::test]
    async fn test_touch_unknown_user_is_a_no_op() {
        let directory = UserDirectory::in_memory();
        directory.touch("ghost").await.unwrap();
    }

    #[tokio::test]
    async fn test_list_preserves_registration_order() {
        let directory = UserDirectory::in_memory();
        directory.register("First").await.unwrap();
        directory.register("Second").await.unwrap();

        let names: Vec<String> = directory
            .list()
            .await
            .into_iter()
            .map(|u| u.display_name)
            .collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[tokio::test]
    async fn test_persistence_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");

        let id = {
            let directory = UserDirectory::open(path.clone()).unwrap();
            directory.register("Persisted").await.unwrap().id
        };

        let reopened = UserDirectory::open(path).unwrap();
        assert_eq!(reopened.get(&id).await.unwrap().display_name, "Persisted");
    }
}
