//! In-memory state store provider
//!
//! Process-local key-value store. Used by tests and as the default when no
//! storage directory is configured; nothing survives a restart.

use async_trait::async_trait;
use pdiary_application::ports::registry::{STATE_STORE_PROVIDERS, StateStoreProviderConfig, StateStoreProviderEntry};
use pdiary_domain::error::Result;
use pdiary_domain::ports::StateStoreProvider;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// HashMap-backed state store
#[derive(Debug, Default, Clone)]
pub struct InMemoryStateStore {
    entries: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryStateStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether nothing is stored
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl StateStoreProvider for InMemoryStateStore {
    async fn save(&self, key: &str, data: &[u8]) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), data.to_vec());
        Ok(())
    }

    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}

#[linkme::distributed_slice(STATE_STORE_PROVIDERS)]
static MEMORY_PROVIDER: StateStoreProviderEntry = StateStoreProviderEntry {
    name: "memory",
    description: "Process-local in-memory store (not persisted)",
    factory: |_config: &StateStoreProviderConfig| Ok(Arc::new(InMemoryStateStore::new())),
};
