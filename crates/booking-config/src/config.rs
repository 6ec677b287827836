use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_catalog_endpoint")]
    pub catalog: ServiceEndpoint,
    #[serde(default = "default_calendar_endpoint")]
    pub calendar: ServiceEndpoint,
    /// Remote ledger service. Absent means the embedded file-backed ledger.
    #[serde(default)]
    pub ledger: Option<ServiceEndpoint>,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceEndpoint {
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Override for the data directory holding users.json and bookings.json.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_catalog_endpoint() -> ServiceEndpoint {
    ServiceEndpoint {
        base_url: "http://localhost:3001".to_string(),
    }
}

fn default_calendar_endpoint() -> ServiceEndpoint {
    ServiceEndpoint {
        base_url: "http://localhost:3202".to_string(),
    }
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: default_catalog_endpoint(),
            calendar: default_calendar_endpoint(),
            ledger: None,
            http: HttpConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Config {
    /// Load from a TOML file, falling back to defaults when the file does
    /// not exist yet.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.catalog.base_url, "http://localhost:3001");
        assert_eq!(config.http.timeout_secs, 10);
        assert!(config.ledger.is_none());
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.ledger = Some(ServiceEndpoint {
            base_url: "http://localhost:3201".to_string(),
        });
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(
            loaded.ledger.unwrap().base_url,
            "http://localhost:3201"
        );
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[catalog]\nbase_url = \"http://movie:3001\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.catalog.base_url, "http://movie:3001");
        assert_eq!(config.calendar.base_url, "http://localhost:3202");
    }
}
