//! Tests for the composition root

use chrono::{NaiveDate, TimeZone, Utc};
use pdiary_application::{
    PhotoAccessInterface, SubscriptionService, SubscriptionServiceInterface,
};
use pdiary_domain::error::Error;
use pdiary_domain::ports::{Clock, PurchaseBackend, StateStoreProvider};
use pdiary_domain::SubscriptionPlan;
use pdiary_infrastructure::config::{AppConfig, StorageConfig};
use pdiary_infrastructure::di::{build_registry, init_app_with_clock};
use pdiary_infrastructure::Lifecycle;
use pdiary_providers::FixedClock;
use std::sync::Arc;

fn clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2024, 7, 25, 12, 0, 0).unwrap(),
    ))
}

fn memory_config() -> AppConfig {
    AppConfig {
        storage: StorageConfig::in_memory(),
        ..AppConfig::default()
    }
}

#[test]
fn test_bindings_and_lifecycles() {
    let registry = build_registry(&memory_config(), clock());

    assert_eq!(registry.lifecycle_of::<dyn Clock>(), Some(Lifecycle::Eager));
    assert_eq!(
        registry.lifecycle_of::<dyn StateStoreProvider>(),
        Some(Lifecycle::LazySync)
    );
    assert_eq!(
        registry.lifecycle_of::<dyn PurchaseBackend>(),
        Some(Lifecycle::LazySync)
    );
    assert_eq!(
        registry.lifecycle_of::<dyn PhotoAccessInterface>(),
        Some(Lifecycle::LazySync)
    );
    assert_eq!(
        registry.lifecycle_of::<SubscriptionService>(),
        Some(Lifecycle::LazyAsync)
    );
    assert_eq!(
        registry.lifecycle_of::<dyn SubscriptionServiceInterface>(),
        Some(Lifecycle::LazyAsync)
    );
    assert_eq!(registry.len(), 6);
}

#[test]
fn test_service_needs_async_resolution() {
    let registry = build_registry(&memory_config(), clock());
    assert!(matches!(
        registry.get::<dyn SubscriptionServiceInterface>(),
        Err(Error::RequiresAsyncInitialization { .. })
    ));

    // Synchronous bindings are usable right away
    let photos = registry.get::<dyn PhotoAccessInterface>().unwrap();
    assert_eq!(
        photos
            .get_accessible_date_for_plan(SubscriptionPlan::Basic)
            .unwrap(),
        NaiveDate::from_ymd_opt(2024, 7, 24).unwrap()
    );
}

#[tokio::test]
async fn test_init_app_resolves_one_service_instance() {
    let context = init_app_with_clock(memory_config(), clock()).await.unwrap();
    let contract = context.subscription().unwrap();
    let concrete = context.registry().get::<SubscriptionService>().unwrap();
    assert!(std::ptr::addr_eq(Arc::as_ptr(&contract), Arc::as_ptr(&concrete)));

    let status = contract.get_current_status().await.unwrap();
    assert_eq!(status.plan, SubscriptionPlan::Basic);
    assert_eq!(contract.get_remaining_generations().await.unwrap(), 10);

    let today = context.clock().unwrap().today();
    assert_eq!(today, NaiveDate::from_ymd_opt(2024, 7, 25).unwrap());
    context.photo_access().unwrap();
}

#[tokio::test]
async fn test_filesystem_state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        storage: StorageConfig::filesystem(dir.path()),
        ..AppConfig::default()
    };

    let first = init_app_with_clock(config.clone(), clock()).await.unwrap();
    let service = first.subscription().unwrap();
    service.increment_ai_usage().await.unwrap();
    service.increment_ai_usage().await.unwrap();
    drop(first);

    let second = init_app_with_clock(config, clock()).await.unwrap();
    let status = second.subscription().unwrap().get_current_status().await.unwrap();
    assert_eq!(status.monthly_usage_count, 2);
}

#[tokio::test]
async fn test_sandbox_purchases_are_wired() {
    let context = init_app_with_clock(memory_config(), clock()).await.unwrap();
    let service = context.subscription().unwrap();

    let status = service
        .purchase_plan(SubscriptionPlan::PremiumYearly)
        .await
        .unwrap();
    assert_eq!(status.plan, SubscriptionPlan::PremiumYearly);
    assert!(service.can_access_advanced_analytics().await.unwrap());
}

#[tokio::test]
async fn test_unknown_store_fails_resolution() {
    let config = AppConfig {
        storage: StorageConfig {
            provider: "carrier-pigeon".to_string(),
            path: None,
        },
        ..AppConfig::default()
    };
    let err = init_app_with_clock(config, clock()).await.unwrap_err();
    match err {
        Error::Configuration { message, .. } => assert!(message.contains("carrier-pigeon")),
        other => panic!("expected Configuration, got {other:?}"),
    }
}
