//! Filesystem state store provider
//!
//! One JSON document per key under a storage directory. Writes go to a
//! temporary sibling file first and are renamed into place, so a crash
//! mid-write never leaves a truncated record behind.
//!
//! ## Example
//!
//! ```ignore
//! use pdiary_providers::state_store::FileStateStore;
//!
//! let store = FileStateStore::new("/var/lib/pdiary");
//! ```

use async_trait::async_trait;
use pdiary_application::ports::registry::{STATE_STORE_PROVIDERS, StateStoreProviderConfig, StateStoreProviderEntry};
use pdiary_domain::error::{Error, Result};
use pdiary_domain::ports::StateStoreProvider;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

const RECORD_EXTENSION: &str = "json";

/// Directory-backed state store
#[derive(Debug, Clone)]
pub struct FileStateStore {
    root: PathBuf,
}

impl FileStateStore {
    /// Create a store rooted at `root`; the directory is created on first write
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Storage directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(Error::invalid_argument(format!(
                "State store key '{key}' must be a plain file name"
            )));
        }
        Ok(self.root.join(format!("{key}.{RECORD_EXTENSION}")))
    }
}

#[async_trait]
impl StateStoreProvider for FileStateStore {
    async fn save(&self, key: &str, data: &[u8]) -> Result<()> {
        let path = self.record_path(key)?;
        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            Error::persistence_with_source(
                format!("Failed to create storage directory {}", self.root.display()),
                e,
            )
        })?;

        let staging = path.with_extension(format!("{RECORD_EXTENSION}.tmp"));
        tokio::fs::write(&staging, data).await.map_err(|e| {
            Error::persistence_with_source(format!("Failed to write {}", staging.display()), e)
        })?;
        tokio::fs::rename(&staging, &path).await.map_err(|e| {
            Error::persistence_with_source(format!("Failed to replace {}", path.display()), e)
        })?;

        debug!(key = key, bytes = data.len(), "State record saved");
        Ok(())
    }

    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.record_path(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::persistence_with_source(
                format!("Failed to read {}", path.display()),
                e,
            )),
        }
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let path = self.record_path(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::persistence_with_source(
                format!("Failed to delete {}", path.display()),
                e,
            )),
        }
    }

    fn provider_name(&self) -> &str {
        "filesystem"
    }
}

#[linkme::distributed_slice(STATE_STORE_PROVIDERS)]
static FILESYSTEM_PROVIDER: StateStoreProviderEntry = StateStoreProviderEntry {
    name: "filesystem",
    description: "JSON documents in a local storage directory",
    factory: |config: &StateStoreProviderConfig| {
        let path = config
            .path
            .clone()
            .ok_or_else(|| "filesystem state store requires a storage path".to_string())?;
        Ok(Arc::new(FileStateStore::new(path)))
    },
};
