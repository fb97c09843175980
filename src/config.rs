//! Runtime configuration
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `QUOTEBOOK_`-prefixed environment variables (`QUOTEBOOK_SERVER__PORT=9000`).
//! Command-line flags are applied on top by the binary.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
    /// Per-request timeout (seconds)
    pub request_timeout_secs: u64,
    /// Grace period for in-flight requests on shutdown (seconds)
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            enable_cors: true,
            request_timeout_secs: 5,
            shutdown_timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub partitions: usize,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            partitions: crate::storage::DEFAULT_PARTITIONS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    /// Directory for daily rolling log files; stdout only when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    pub ansi: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
            ansi: true,
        }
    }
}

impl Settings {
    /// Load settings from defaults, an optional file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = ::config::Config::try_from(&Settings::default())
            .map_err(|e| Error::Config(e.to_string()))?;

        let mut builder = ::config::Config::builder().add_source(defaults);
        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(true));
        }
        builder = builder.add_source(
            ::config::Environment::with_prefix("QUOTEBOOK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings: Settings = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| Error::Config(e.to_string()))?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.storage.partitions == 0 {
            return Err(Error::Config(
                "storage.partitions must be at least 1".to_string(),
            ));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(Error::Config(
                "server.request_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.server.shutdown_timeout_secs == 0 {
            return Err(Error::Config(
                "server.shutdown_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.server.host.trim().is_empty() {
            return Err(Error::Config("server.host must not be empty".to_string()));
        }
        Ok(())
    }

    /// `host:port` to bind the HTTP listener to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Render the effective settings as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Internal(e.to_string()))
    }
}
