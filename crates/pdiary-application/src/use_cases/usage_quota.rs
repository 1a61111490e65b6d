//! Usage Quota Tracker
//!
//! State machine over the monthly AI generation counter. The counter lives
//! in `[0, monthly_generation_limit]`: an increment without headroom is
//! rejected with `QuotaExceeded` and nothing is written. Expiry of a premium
//! plan overrides the arithmetic and leaves no headroom at all.

use super::status_store::SubscriptionStatusStore;
use pdiary_domain::SubscriptionStatus;
use pdiary_domain::error::{Error, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Enforces and mutates the monthly generation counter
#[derive(Debug, Clone)]
pub struct UsageQuotaTracker {
    store: Arc<SubscriptionStatusStore>,
}

impl UsageQuotaTracker {
    /// Create a tracker over the status store
    pub fn new(store: Arc<SubscriptionStatusStore>) -> Self {
        Self { store }
    }

    /// `max(0, limit - used)`, or zero for a lapsed premium plan
    pub async fn get_remaining_generations(&self) -> Result<u32> {
        let status = self.store.get_current_status().await?;
        Ok(status.remaining_generations(self.store.clock().now()))
    }

    /// Headroom left and the plan is not a lapsed premium plan
    pub async fn can_use_ai_generation(&self) -> Result<bool> {
        let status = self.store.get_current_status().await?;
        let now = self.store.clock().now();
        Ok(status.remaining_generations(now) > 0 && status.is_plan_active(now))
    }

    /// Consume one generation
    pub async fn increment_ai_usage(&self) -> Result<SubscriptionStatus> {
        let status = self
            .store
            .mutate(|current, now| {
                if current.remaining_generations(now) == 0 {
                    warn!(
                        plan = %current.plan,
                        usage = current.monthly_usage_count,
                        "AI generation rejected: no quota left"
                    );
                    return Err(Error::quota_exceeded());
                }
                let mut next = current.clone();
                next.monthly_usage_count = current.monthly_usage_count.saturating_add(1);
                Ok(Some(next))
            })
            .await?;

        debug!(
            plan = %status.plan,
            usage = status.monthly_usage_count,
            "AI generation recorded"
        );
        Ok(status)
    }

    /// Zero the counter and restart the usage month now
    pub async fn reset_usage(&self) -> Result<SubscriptionStatus> {
        let status = self
            .store
            .mutate(|current, now| Ok(Some(reset(current, now))))
            .await?;
        info!(plan = %status.plan, "Monthly usage reset");
        Ok(status)
    }

    /// Reset when the next reset date has been reached
    pub async fn reset_usage_if_due(&self) -> Result<bool> {
        let mut rolled_over = false;
        self.store
            .mutate(|current, now| match current.next_reset_date() {
                Some(boundary) if now >= boundary => {
                    rolled_over = true;
                    Ok(Some(reset(current, now)))
                }
                _ => Ok(None),
            })
            .await?;

        if rolled_over {
            info!("Usage month rolled over, counter reset");
        }
        Ok(rolled_over)
    }
}

fn reset(current: &SubscriptionStatus, now: chrono::DateTime<chrono::Utc>) -> SubscriptionStatus {
    SubscriptionStatus {
        monthly_usage_count: 0,
        last_reset_date: now,
        ..current.clone()
    }
}
