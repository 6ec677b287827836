pub mod config;
pub mod paths;

pub use config::{Config, HttpConfig, ServiceEndpoint, StorageConfig};
pub use paths::{container_base_path, PathManager};
