//! Server configuration
//!
//! TOML-parseable config with sensible defaults. The durability policy is
//! an explicit setting; best-effort is the default, keeping the in-memory
//! view authoritative when a write fails.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How engine operations treat a failed durable write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Durability {
    /// Keep the in-memory state and log a warning (trust the local view)
    #[default]
    BestEffort,
    /// Propagate the store failure to the caller
    Strict,
}

/// Which store backend to run against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StorageBackend {
    /// Flat JSON file on disk
    #[default]
    File,
    /// In-memory cache, for serverless deploys
    Memory,
}

/// The single fixed admin credential pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin123".to_string(),
        }
    }
}

/// Top-level configuration for the hub
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HubConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
    /// Store file location; defaults to the platform data directory
    pub data_file: Option<PathBuf>,
    pub durability: Durability,
    /// Load demo students and activities on first run
    pub seed_demo: bool,
    pub admin: AdminCredentials,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            storage: StorageBackend::File,
            data_file: None,
            durability: Durability::BestEffort,
            seed_demo: false,
            admin: AdminCredentials::default(),
        }
    }
}

impl HubConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Resolve the store file path: the configured one, or
    /// `<data dir>/db.json` under the platform data directory
    pub fn resolved_data_file(&self) -> Result<PathBuf> {
        if let Some(path) = &self.data_file {
            return Ok(path.clone());
        }
        let dirs = ProjectDirs::from("dev", "activityhub", "activityhub").ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine data directory",
            ))
        })?;
        Ok(dirs.data_dir().join("db.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HubConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.durability, Durability::BestEffort);
        assert_eq!(config.storage, StorageBackend::File);
        assert!(!config.seed_demo);
        assert_eq!(config.admin.username, "admin");
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: HubConfig = toml::from_str(
            r#"
            port = 8080
            storage = "memory"
            durability = "strict"
            seed-demo = true

            [admin]
            username = "root"
            password = "hunter2"
            "#,
        )
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.durability, Durability::Strict);
        assert!(config.seed_demo);
        assert_eq!(config.admin.password, "hunter2");
    }

    #[test]
    fn test_explicit_data_file_wins() {
        let config = HubConfig {
            data_file: Some(PathBuf::from("/tmp/hub.json")),
            ..Default::default()
        };
        assert_eq!(
            config.resolved_data_file().unwrap(),
            PathBuf::from("/tmp/hub.json")
        );
    }
}
