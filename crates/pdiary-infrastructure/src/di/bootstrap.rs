//! Composition Root
//!
//! Binds the engine's services into a [`ServiceRegistry`]:
//!
//! ```text
//! AppConfig ─► dyn StateStoreProvider  (lazy, linkme registry)
//!              dyn Clock               (eager)
//!              dyn PurchaseBackend     (lazy, receipts in the state store)
//!              dyn PhotoAccessInterface(lazy)
//!              SubscriptionService     (lazy async, initializes the record)
//!              dyn SubscriptionServiceInterface ─► SubscriptionService
//! ```
//!
//! State stores are discovered through `STATE_STORE_PROVIDERS`; linking
//! `pdiary-providers` is enough to make its stores available.

use crate::config::AppConfig;
use crate::di::registry::ServiceRegistry;
use pdiary_application::ports::registry::resolve_state_store_provider;
use pdiary_application::{
    PhotoAccessInterface, PhotoDateWindowEvaluator, SubscriptionService,
    SubscriptionServiceInterface,
};
use pdiary_domain::error::{Error, Result};
use pdiary_domain::ports::{Clock, PurchaseBackend, StateStoreProvider};
use pdiary_providers::{SandboxPurchaseBackend, SystemClock};
use std::sync::Arc;
use tracing::info;

/// Bind every engine service into a fresh registry
///
/// Nothing is constructed apart from the clock; stores and services are
/// built on first lookup.
pub fn build_registry(config: &AppConfig, clock: Arc<dyn Clock>) -> ServiceRegistry {
    let registry = ServiceRegistry::new();
    registry.register_singleton::<dyn Clock>(clock);

    let storage = config.storage.to_provider_config();
    registry.register_factory::<dyn StateStoreProvider, _>(move |_| {
        let store = resolve_state_store_provider(&storage).map_err(Error::configuration)?;
        info!(provider = store.provider_name(), "State store ready");
        Ok(store)
    });

    registry.register_factory::<dyn PurchaseBackend, _>(|registry| {
        let clock = registry.get::<dyn Clock>()?;
        let receipts = registry.get::<dyn StateStoreProvider>()?;
        Ok(Arc::new(SandboxPurchaseBackend::new(clock, receipts)) as Arc<dyn PurchaseBackend>)
    });

    registry.register_factory::<dyn PhotoAccessInterface, _>(|registry| {
        let clock = registry.get::<dyn Clock>()?;
        Ok(Arc::new(PhotoDateWindowEvaluator::new(clock)) as Arc<dyn PhotoAccessInterface>)
    });

    registry.register_async_factory::<SubscriptionService, _, _>(|registry| async move {
        let state_store = registry.get::<dyn StateStoreProvider>()?;
        let clock = registry.get::<dyn Clock>()?;
        let purchases = registry.get::<dyn PurchaseBackend>()?;
        let service = SubscriptionService::initialized(state_store, clock, purchases).await?;
        Ok::<_, Error>(Arc::new(service))
    });

    registry.register_async_factory::<dyn SubscriptionServiceInterface, _, _>(
        |registry| async move {
            let service = registry.get_async::<SubscriptionService>().await?;
            Ok::<_, Error>(service as Arc<dyn SubscriptionServiceInterface>)
        },
    );

    registry
}

/// Application context: configuration plus the resolved registry
#[derive(Clone)]
pub struct AppContext {
    /// Application configuration
    pub config: Arc<AppConfig>,
    registry: ServiceRegistry,
}

impl AppContext {
    /// The registry every service was resolved from
    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    /// Subscription service contract
    pub fn subscription(&self) -> Result<Arc<dyn SubscriptionServiceInterface>> {
        self.registry.get::<dyn SubscriptionServiceInterface>()
    }

    /// Photo access contract
    pub fn photo_access(&self) -> Result<Arc<dyn PhotoAccessInterface>> {
        self.registry.get::<dyn PhotoAccessInterface>()
    }

    /// Clock shared by every service
    pub fn clock(&self) -> Result<Arc<dyn Clock>> {
        self.registry.get::<dyn Clock>()
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .finish()
    }
}

/// Build the registry on the system clock and resolve the engine
pub async fn init_app(config: AppConfig) -> Result<AppContext> {
    init_app_with_clock(config, Arc::new(SystemClock::new())).await
}

/// Build the registry on `clock` and resolve the engine
///
/// Async services are resolved here so that the context's accessors can
/// use synchronous lookups afterwards.
pub async fn init_app_with_clock(config: AppConfig, clock: Arc<dyn Clock>) -> Result<AppContext> {
    info!(storage = %config.storage.provider, "Initializing application context");
    let registry = build_registry(&config, clock);
    registry
        .get_async::<dyn SubscriptionServiceInterface>()
        .await?;
    info!(services = registry.len(), "Application context ready");

    Ok(AppContext {
        config: Arc::new(config),
        registry,
    })
}
