//! State Store Provider Registry
//!
//! Auto-registration system for key-value persistence backends.
//! Providers register themselves into [`STATE_STORE_PROVIDERS`] with
//! `#[linkme::distributed_slice]` and are discovered at runtime by name.

use std::path::PathBuf;
use std::sync::Arc;

use pdiary_domain::ports::StateStoreProvider;

/// Configuration for state store provider creation
///
/// Contains all configuration options that a state store might need.
/// Providers should use what they need and ignore the rest.
#[derive(Debug, Clone, Default)]
pub struct StateStoreProviderConfig {
    /// Provider name (e.g., "memory", "filesystem")
    pub provider: String,
    /// Storage directory (for file-backed stores)
    pub path: Option<PathBuf>,
}

impl StateStoreProviderConfig {
    /// Create a new config with the given provider name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the storage directory
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Registry entry for state store providers
pub struct StateStoreProviderEntry {
    /// Unique provider name (e.g., "memory", "filesystem")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create provider instance
    pub factory: fn(&StateStoreProviderConfig) -> Result<Arc<dyn StateStoreProvider>, String>,
}

// Auto-collection via linkme distributed slices - providers submit entries at compile time
#[linkme::distributed_slice]
pub static STATE_STORE_PROVIDERS: [StateStoreProviderEntry] = [..];

/// Resolve state store provider by name from registry
///
/// # Returns
/// * `Ok(Arc<dyn StateStoreProvider>)` - Created provider instance
/// * `Err(String)` - Error message if provider not found or creation failed
pub fn resolve_state_store_provider(
    config: &StateStoreProviderConfig,
) -> Result<Arc<dyn StateStoreProvider>, String> {
    let provider_name = &config.provider;

    for entry in STATE_STORE_PROVIDERS {
        if entry.name == provider_name {
            return (entry.factory)(config);
        }
    }

    let available: Vec<&str> = STATE_STORE_PROVIDERS.iter().map(|e| e.name).collect();
    Err(format!(
        "Unknown state store provider '{provider_name}'. Available providers: {available:?}"
    ))
}

/// List all registered state store providers as (name, description) tuples
pub fn list_state_store_providers() -> Vec<(&'static str, &'static str)> {
    STATE_STORE_PROVIDERS
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}
