//! Tests for the usage quota tracker

use crate::test_support::{Fixture, now, status_on};
use chrono::Duration;
use pdiary_application::UsageQuotaTracker;
use pdiary_domain::{SubscriptionPlan, SubscriptionStatus};

fn tracker(fixture: &Fixture) -> UsageQuotaTracker {
    UsageQuotaTracker::new(fixture.store.clone())
}

#[tokio::test]
async fn test_basic_plan_exhausts_after_ten_generations() {
    let fixture = Fixture::new();
    let quota = tracker(&fixture);
    assert_eq!(quota.get_remaining_generations().await.unwrap(), 10);

    for used in 1..=10 {
        assert!(quota.can_use_ai_generation().await.unwrap());
        let status = quota.increment_ai_usage().await.unwrap();
        assert_eq!(status.monthly_usage_count, used);
    }

    assert!(!quota.can_use_ai_generation().await.unwrap());
    assert_eq!(quota.get_remaining_generations().await.unwrap(), 0);

    let err = quota.increment_ai_usage().await.unwrap_err();
    assert!(err.is_quota_exceeded());
    assert_eq!(err.to_string(), "Monthly AI generation limit reached");
    assert_eq!(
        fixture.store.get_current_status().await.unwrap().monthly_usage_count,
        10
    );
}

#[tokio::test]
async fn test_premium_monthly_remaining() {
    let fixture = Fixture::with_status(status_on(SubscriptionPlan::PremiumMonthly, 15)).await;
    assert_eq!(tracker(&fixture).get_remaining_generations().await.unwrap(), 85);
}

#[tokio::test]
async fn test_remaining_matches_limit_minus_usage_for_all_plans() {
    for plan in SubscriptionPlan::ALL {
        let limit = plan.definition().monthly_generation_limit;
        for usage in [0, 1, limit / 2, limit - 1, limit, limit + 5] {
            let fixture = Fixture::with_status(status_on(plan, usage)).await;
            let quota = tracker(&fixture);
            let expected = limit.saturating_sub(usage);
            assert_eq!(quota.get_remaining_generations().await.unwrap(), expected);
            assert_eq!(quota.can_use_ai_generation().await.unwrap(), expected > 0);
        }
    }
}

#[tokio::test]
async fn test_limit_reached_rejects_without_mutation() {
    for plan in SubscriptionPlan::ALL {
        let limit = plan.definition().monthly_generation_limit;
        let fixture = Fixture::with_status(status_on(plan, limit)).await;
        let quota = tracker(&fixture);

        assert!(!quota.can_use_ai_generation().await.unwrap());
        assert!(quota.increment_ai_usage().await.unwrap_err().is_quota_exceeded());
        assert_eq!(
            fixture.store.get_current_status().await.unwrap().monthly_usage_count,
            limit
        );
    }
}

#[tokio::test]
async fn test_expired_premium_has_no_quota() {
    let status = SubscriptionStatus {
        expiry_date: Some(now() - Duration::days(1)),
        ..status_on(SubscriptionPlan::PremiumMonthly, 3)
    };
    let fixture = Fixture::with_status(status).await;
    let quota = tracker(&fixture);

    assert_eq!(quota.get_remaining_generations().await.unwrap(), 0);
    assert!(!quota.can_use_ai_generation().await.unwrap());
    assert!(quota.increment_ai_usage().await.unwrap_err().is_quota_exceeded());
}

#[tokio::test]
async fn test_expiry_takes_effect_as_time_passes() {
    let status = SubscriptionStatus {
        expiry_date: Some(now() + Duration::hours(1)),
        ..status_on(SubscriptionPlan::PremiumYearly, 0)
    };
    let fixture = Fixture::with_status(status).await;
    let quota = tracker(&fixture);
    assert!(quota.can_use_ai_generation().await.unwrap());

    fixture.clock.advance(Duration::hours(2));
    assert!(!quota.can_use_ai_generation().await.unwrap());
}

#[tokio::test]
async fn test_reset_usage_is_idempotent() {
    let fixture = Fixture::with_status(status_on(SubscriptionPlan::Basic, 10)).await;
    let quota = tracker(&fixture);
    fixture.clock.advance(Duration::days(2));

    let first = quota.reset_usage().await.unwrap();
    assert_eq!(first.monthly_usage_count, 0);
    assert_eq!(first.last_reset_date, now() + Duration::days(2));

    let second = quota.reset_usage().await.unwrap();
    assert_eq!(second.monthly_usage_count, 0);
    assert_eq!(quota.get_remaining_generations().await.unwrap(), 10);
}

#[tokio::test]
async fn test_reset_if_due_only_after_boundary() {
    let fixture = Fixture::with_status(status_on(SubscriptionPlan::Basic, 7)).await;
    let quota = tracker(&fixture);

    fixture.clock.advance(Duration::days(30));
    assert!(!quota.reset_usage_if_due().await.unwrap());
    assert_eq!(quota.get_remaining_generations().await.unwrap(), 3);

    // 2024-07-25 + 1 month = 2024-08-25, 31 days later
    fixture.clock.advance(Duration::days(1));
    assert!(quota.reset_usage_if_due().await.unwrap());
    let status = fixture.store.get_current_status().await.unwrap();
    assert_eq!(status.monthly_usage_count, 0);
    assert_eq!(status.last_reset_date, now() + Duration::days(31));

    assert!(!quota.reset_usage_if_due().await.unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_increments_never_exceed_limit() {
    let fixture = Fixture::new();
    let quota = tracker(&fixture);

    let attempts: Vec<_> = (0..25)
        .map(|_| {
            let quota = quota.clone();
            tokio::spawn(async move { quota.increment_ai_usage().await })
        })
        .collect();

    let mut succeeded = 0;
    let mut rejected = 0;
    for attempt in futures::future::join_all(attempts).await {
        match attempt.unwrap() {
            Ok(_) => succeeded += 1,
            Err(e) => {
                assert!(e.is_quota_exceeded());
                rejected += 1;
            }
        }
    }

    assert_eq!(succeeded, 10);
    assert_eq!(rejected, 15);
    assert_eq!(
        fixture.store.get_current_status().await.unwrap().monthly_usage_count,
        10
    );
}
