//! Tests for the subscription service facade

use crate::test_support::{Fixture, now, status_on};
use chrono::{Duration, Months, NaiveDate};
use pdiary_application::{SubscriptionService, SubscriptionServiceInterface};
use pdiary_domain::constants::SUBSCRIPTION_STATUS_KEY;
use pdiary_domain::ports::StateStoreProvider;
use pdiary_domain::{Error, PurchaseEvent, SubscriptionPlan, SubscriptionStatus};
use pdiary_providers::{InMemoryStateStore, NullPurchaseBackend, SandboxPurchaseBackend};
use std::sync::Arc;

fn sandbox_service(fixture: &Fixture) -> SubscriptionService {
    SubscriptionService::new(
        fixture.state.clone(),
        fixture.clock.clone(),
        Arc::new(SandboxPurchaseBackend::new(
            fixture.clock.clone(),
            fixture.state.clone(),
        )),
    )
}

#[tokio::test]
async fn test_initialized_persists_first_launch_record() {
    let state = Arc::new(InMemoryStateStore::new());
    let clock = Arc::new(pdiary_providers::FixedClock::new(now()));
    let service = SubscriptionService::initialized(
        state.clone(),
        clock,
        Arc::new(NullPurchaseBackend::new()),
    )
    .await
    .unwrap();

    assert!(state.load(SUBSCRIPTION_STATUS_KEY).await.unwrap().is_some());
    assert_eq!(
        service.get_current_status().await.unwrap(),
        SubscriptionStatus::basic(now())
    );
}

#[tokio::test]
async fn test_basic_user_generates_until_limit() {
    let fixture = Fixture::new();
    let service = fixture.service();

    for _ in 0..10 {
        service.increment_ai_usage().await.unwrap();
    }
    assert!(!service.can_use_ai_generation().await.unwrap());
    assert_eq!(service.get_remaining_generations().await.unwrap(), 0);
    assert!(matches!(
        service.increment_ai_usage().await,
        Err(Error::QuotaExceeded { .. })
    ));
}

#[tokio::test]
async fn test_reset_restores_quota() {
    let fixture = Fixture::with_status(status_on(SubscriptionPlan::Basic, 10)).await;
    let service = fixture.service();

    let status = service.reset_usage().await.unwrap();
    assert_eq!(status.monthly_usage_count, 0);
    assert!(service.can_use_ai_generation().await.unwrap());
    assert_eq!(
        service.get_next_reset_date().await.unwrap(),
        now().checked_add_months(Months::new(1)).unwrap()
    );
}

#[tokio::test]
async fn test_service_is_shareable_across_tasks() {
    let fixture = Fixture::with_status(status_on(SubscriptionPlan::PremiumMonthly, 95)).await;
    let service: Arc<dyn SubscriptionServiceInterface> = Arc::new(fixture.service());

    let tasks = (0..8).map(|_| {
        let service = Arc::clone(&service);
        async move { service.increment_ai_usage().await.is_ok() }
    });
    let granted = futures::future::join_all(tasks)
        .await
        .into_iter()
        .filter(|ok| *ok)
        .count();

    assert_eq!(granted, 5);
    assert_eq!(service.get_remaining_generations().await.unwrap(), 0);
}

#[tokio::test]
async fn test_can_use_photo_follows_effective_plan() {
    let status = SubscriptionStatus {
        expiry_date: Some(now() + Duration::days(1)),
        ..status_on(SubscriptionPlan::PremiumYearly, 0)
    };
    let fixture = Fixture::with_status(status).await;
    let service = fixture.service();
    let last_month = NaiveDate::from_ymd_opt(2024, 6, 20)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();

    assert!(service.can_use_photo(last_month).await.unwrap());

    // Lapsed premium falls back to the Basic window
    fixture.clock.advance(Duration::days(2));
    assert!(!service.can_use_photo(last_month).await.unwrap());
}

#[tokio::test]
async fn test_sandbox_purchase_upgrades_and_resets_usage() {
    let fixture = Fixture::with_status(status_on(SubscriptionPlan::Basic, 10)).await;
    let service = sandbox_service(&fixture);

    let status = service
        .purchase_plan(SubscriptionPlan::PremiumMonthly)
        .await
        .unwrap();
    assert_eq!(status.plan, SubscriptionPlan::PremiumMonthly);
    assert_eq!(status.monthly_usage_count, 0);
    assert_eq!(status.expiry_date, now().checked_add_months(Months::new(1)));
    assert!(status.auto_renewal);
    assert!(
        status
            .transaction_id
            .as_deref()
            .is_some_and(|id| id.starts_with("sandbox-"))
    );

    assert_eq!(service.get_remaining_generations().await.unwrap(), 100);
    assert!(service.can_access_premium_features().await.unwrap());
    assert_eq!(service.get_current_status().await.unwrap(), status);
}

#[tokio::test]
async fn test_basic_cannot_be_purchased() {
    let fixture = Fixture::new();
    let err = sandbox_service(&fixture)
        .purchase_plan(SubscriptionPlan::Basic)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Purchase { .. }));
}

#[tokio::test]
async fn test_null_backend_refuses_purchase_and_has_nothing_to_restore() {
    let fixture = Fixture::new();
    let service = fixture.service();

    let err = service
        .purchase_plan(SubscriptionPlan::PremiumYearly)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Purchase { .. }));
    assert_eq!(
        service.get_current_status().await.unwrap().plan,
        SubscriptionPlan::Basic
    );
    assert!(service.restore_purchases().await.unwrap().is_none());
}

#[tokio::test]
async fn test_restore_reapplies_last_purchase() {
    let fixture = Fixture::new();
    let service = sandbox_service(&fixture);
    assert!(service.restore_purchases().await.unwrap().is_none());

    service
        .purchase_plan(SubscriptionPlan::PremiumYearly)
        .await
        .unwrap();
    service.apply_purchase_event(PurchaseEvent::Revoked).await.unwrap();
    assert_eq!(
        service.get_current_status().await.unwrap().plan,
        SubscriptionPlan::Basic
    );

    let restored = service.restore_purchases().await.unwrap().unwrap();
    assert_eq!(restored.plan, SubscriptionPlan::PremiumYearly);
}

#[tokio::test]
async fn test_restore_does_not_refill_used_quota() {
    let fixture = Fixture::new();
    let service = sandbox_service(&fixture);
    service
        .purchase_plan(SubscriptionPlan::PremiumMonthly)
        .await
        .unwrap();
    for _ in 0..100 {
        service.increment_ai_usage().await.unwrap();
    }
    assert!(!service.can_use_ai_generation().await.unwrap());

    fixture.clock.advance(Duration::days(3));
    for _ in 0..3 {
        let restored = service.restore_purchases().await.unwrap().unwrap();
        assert_eq!(restored.plan, SubscriptionPlan::PremiumMonthly);
        assert_eq!(restored.monthly_usage_count, 100);
    }
    assert_eq!(service.get_remaining_generations().await.unwrap(), 0);
    assert!(service.increment_ai_usage().await.unwrap_err().is_quota_exceeded());
}

#[tokio::test]
async fn test_revoke_caps_usage_at_basic_limit() {
    let status = SubscriptionStatus {
        expiry_date: Some(now() + Duration::days(20)),
        ..status_on(SubscriptionPlan::PremiumMonthly, 50)
    };
    let fixture = Fixture::with_status(status).await;
    let service = fixture.service();

    let status = service.apply_purchase_event(PurchaseEvent::Revoked).await.unwrap();
    assert_eq!(status.plan, SubscriptionPlan::Basic);
    assert_eq!(status.monthly_usage_count, 10);

    let stored = service.get_current_status().await.unwrap();
    assert_eq!(stored.monthly_usage_count, 10);
    assert_eq!(service.get_remaining_generations().await.unwrap(), 0);
}

#[tokio::test]
async fn test_expired_event_revokes_premium_now() {
    let status = SubscriptionStatus {
        expiry_date: Some(now() + Duration::days(20)),
        auto_renewal: true,
        ..status_on(SubscriptionPlan::PremiumMonthly, 30)
    };
    let fixture = Fixture::with_status(status).await;
    let service = fixture.service();
    fixture.clock.advance(Duration::seconds(1));

    let status = service.apply_purchase_event(PurchaseEvent::Expired).await.unwrap();
    assert!(!status.is_active);
    assert!(!status.auto_renewal);
    assert_eq!(status.expiry_date, Some(now() + Duration::seconds(1)));

    fixture.clock.advance(Duration::seconds(1));
    assert!(!service.can_access_premium_features().await.unwrap());
    assert_eq!(service.get_remaining_generations().await.unwrap(), 0);
}

#[tokio::test]
async fn test_renewal_extends_expiry() {
    let status = SubscriptionStatus {
        expiry_date: Some(now() - Duration::days(1)),
        ..status_on(SubscriptionPlan::PremiumMonthly, 2)
    };
    let fixture = Fixture::with_status(status).await;
    let service = fixture.service();
    assert!(!service.can_access_premium_features().await.unwrap());

    let status = service
        .apply_purchase_event(PurchaseEvent::Renewed {
            transaction_id: "renewal-1".into(),
            expires_at: now() + Duration::days(30),
        })
        .await
        .unwrap();
    assert_eq!(status.monthly_usage_count, 2);
    assert_eq!(status.transaction_id.as_deref(), Some("renewal-1"));
    assert!(service.can_access_premium_features().await.unwrap());
    assert_eq!(service.get_remaining_generations().await.unwrap(), 98);
}

#[tokio::test]
async fn test_auto_renewal_toggle_only_touches_flag() {
    let fixture = Fixture::with_status(status_on(SubscriptionPlan::PremiumYearly, 7)).await;
    let service = fixture.service();
    let before = service.get_current_status().await.unwrap();

    let after = service
        .apply_purchase_event(PurchaseEvent::AutoRenewalChanged { enabled: true })
        .await
        .unwrap();
    assert!(after.auto_renewal);
    assert_eq!(
        after,
        SubscriptionStatus {
            auto_renewal: true,
            ..before
        }
    );
}
