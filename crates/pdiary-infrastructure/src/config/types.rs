//! Configuration types

use crate::constants::{
    DEFAULT_DATA_DIR, DEFAULT_LOG_LEVEL, DEFAULT_STORAGE_PROVIDER, FALLBACK_STORAGE_PROVIDER,
};
use pdiary_application::ports::registry::StateStoreProviderConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration of the engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Persistence configuration
    pub storage: StorageConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,

    /// Log to a daily rolling file in addition to stderr
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
        }
    }
}

/// Persistence configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// State store provider name (`memory`, `filesystem`)
    pub provider: String,

    /// Directory of the filesystem store
    pub path: Option<PathBuf>,
}

impl Default for StorageConfig {
    /// Filesystem store under the user data directory, in memory without one
    fn default() -> Self {
        match dirs::data_local_dir() {
            Some(dir) => Self {
                provider: DEFAULT_STORAGE_PROVIDER.to_string(),
                path: Some(dir.join(DEFAULT_DATA_DIR)),
            },
            None => Self::in_memory(),
        }
    }
}

impl StorageConfig {
    /// Volatile in-memory store
    pub fn in_memory() -> Self {
        Self {
            provider: FALLBACK_STORAGE_PROVIDER.to_string(),
            path: None,
        }
    }

    /// Filesystem store rooted at `path`
    pub fn filesystem(path: impl Into<PathBuf>) -> Self {
        Self {
            provider: "filesystem".to_string(),
            path: Some(path.into()),
        }
    }

    /// Provider registry request for this configuration
    pub fn to_provider_config(&self) -> StateStoreProviderConfig {
        let config = StateStoreProviderConfig::new(&self.provider);
        match &self.path {
            Some(path) => config.with_path(path),
            None => config,
        }
    }
}
