//! Configuration structures for the RFQ pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, RfqError};

/// Main configuration for the rfq tools.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RfqConfig {
    /// Storage configuration.
    pub storage: StorageConfig,

    /// HTTP server configuration.
    pub server: ServerConfig,

    /// Extraction configuration.
    pub extraction: ExtractionConfig,
}

/// Where uploads and the database live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Base directory for the database and uploads.
    pub data_dir: PathBuf,

    /// Explicit database URL. Defaults to `rfq.db` inside `data_dir`.
    pub database_url: Option<String>,

    /// Upload directory. Defaults to `uploads` inside `data_dir`.
    pub uploads_dir: Option<PathBuf>,

    /// Maximum pooled database connections.
    pub max_connections: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("rfq"),
            database_url: None,
            uploads_dir: None,
            max_connections: 5,
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,

    /// Bind port.
    pub port: u16,

    /// Maximum accepted upload size in bytes.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            max_upload_bytes: 20 * 1024 * 1024,
        }
    }
}

/// Extraction configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Keep the decoded document text on the document record.
    pub retain_raw_text: bool,
}

impl RfqConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| RfqError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| RfqError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Default location of the configuration file.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rfq")
            .join("config.json")
    }

    /// Load from `path` if given, else from the default path if it exists,
    /// else defaults. Environment overrides are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Self::default_path();
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env();
        Ok(config)
    }

    /// Apply `RFQ_DATA_DIR`, `DATABASE_URL`, `RFQ_HOST` and `PORT` overrides.
    pub fn apply_env(&mut self) {
        if let Ok(dir) = std::env::var("RFQ_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(dir);
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.storage.database_url = Some(url);
        }
        if let Ok(host) = std::env::var("RFQ_HOST") {
            self.server.host = host;
        }
        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
    }

    /// Effective database URL.
    pub fn database_url(&self) -> String {
        self.storage.database_url.clone().unwrap_or_else(|| {
            format!(
                "sqlite:{}?mode=rwc",
                self.storage.data_dir.join("rfq.db").display()
            )
        })
    }

    /// Effective upload directory.
    pub fn uploads_dir(&self) -> PathBuf {
        self.storage
            .uploads_dir
            .clone()
            .unwrap_or_else(|| self.storage.data_dir.join("uploads"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_derived_paths() {
        let mut config = RfqConfig::default();
        config.storage.data_dir = PathBuf::from("/srv/rfq");

        assert_eq!(config.database_url(), "sqlite:/srv/rfq/rfq.db?mode=rwc");
        assert_eq!(config.uploads_dir(), PathBuf::from("/srv/rfq/uploads"));

        config.storage.uploads_dir = Some(PathBuf::from("/mnt/files"));
        config.storage.database_url = Some("sqlite::memory:".to_string());
        assert_eq!(config.database_url(), "sqlite::memory:");
        assert_eq!(config.uploads_dir(), PathBuf::from("/mnt/files"));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = RfqConfig::default();
        config.server.port = 8080;
        config.extraction.retain_raw_text = true;
        config.save(&path).unwrap();

        let loaded = RfqConfig::from_file(&path).unwrap();
        assert_eq!(loaded.server.port, 8080);
        assert!(loaded.extraction.retain_raw_text);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "server": { "port": 9000 } }"#).unwrap();

        let loaded = RfqConfig::from_file(&path).unwrap();
        assert_eq!(loaded.server.port, 9000);
        assert_eq!(loaded.server.host, "0.0.0.0");
        assert_eq!(loaded.storage.max_connections, 5);
        assert!(!loaded.extraction.retain_raw_text);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(RfqConfig::from_file(&path), Err(RfqError::Config(_))));
    }
}
