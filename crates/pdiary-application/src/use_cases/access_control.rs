//! Access Control Manager
//!
//! Capability answers are pure functions of the stored status, its plan
//! definition and the current time. A plan with no expiry date (Basic)
//! never expires; an expired premium plan loses every premium capability
//! and its AI quota, whatever the counter says.

use super::status_store::SubscriptionStatusStore;
use chrono::{DateTime, Utc};
use pdiary_domain::error::Result;
use pdiary_domain::{Capabilities, SubscriptionStatus};
use std::sync::Arc;

/// Plan-gated capability checks
#[derive(Debug, Clone)]
pub struct AccessControlManager {
    store: Arc<SubscriptionStatusStore>,
}

impl AccessControlManager {
    /// Create a manager over the status store
    pub fn new(store: Arc<SubscriptionStatusStore>) -> Self {
        Self { store }
    }

    /// Premium plan and not expired
    pub fn premium_features(status: &SubscriptionStatus, now: DateTime<Utc>) -> bool {
        status.plan_definition().is_premium && !status.is_expired(now)
    }

    /// Basic gets a reduced prompt catalogue upstream, never a denial
    pub fn writing_prompts(_status: &SubscriptionStatus, _now: DateTime<Utc>) -> bool {
        true
    }

    /// Premium rule plus the plan's advanced filters flag
    pub fn advanced_filters(status: &SubscriptionStatus, now: DateTime<Utc>) -> bool {
        Self::premium_features(status, now) && status.plan_definition().has_advanced_filters
    }

    /// Premium rule plus the plan's advanced analytics flag
    pub fn advanced_analytics(status: &SubscriptionStatus, now: DateTime<Utc>) -> bool {
        Self::premium_features(status, now) && status.plan_definition().has_advanced_analytics
    }

    /// Every capability of `status` at `now`
    pub fn evaluate(status: &SubscriptionStatus, now: DateTime<Utc>) -> Capabilities {
        let remaining_generations = status.remaining_generations(now);
        Capabilities {
            plan: status.plan,
            premium_features: Self::premium_features(status, now),
            writing_prompts: Self::writing_prompts(status, now),
            advanced_filters: Self::advanced_filters(status, now),
            advanced_analytics: Self::advanced_analytics(status, now),
            ai_generation: remaining_generations > 0 && status.is_plan_active(now),
            remaining_generations,
        }
    }

    /// Premium features for the stored status
    pub async fn can_access_premium_features(&self) -> Result<bool> {
        self.check(Self::premium_features).await
    }

    /// Writing prompts for the stored status
    pub async fn can_access_writing_prompts(&self) -> Result<bool> {
        self.check(Self::writing_prompts).await
    }

    /// Advanced filters for the stored status
    pub async fn can_access_advanced_filters(&self) -> Result<bool> {
        self.check(Self::advanced_filters).await
    }

    /// Advanced analytics for the stored status
    pub async fn can_access_advanced_analytics(&self) -> Result<bool> {
        self.check(Self::advanced_analytics).await
    }

    /// Capability snapshot for the stored status
    pub async fn capabilities(&self) -> Result<Capabilities> {
        let status = self.store.get_current_status().await?;
        Ok(Self::evaluate(&status, self.store.clock().now()))
    }

    async fn check(&self, rule: fn(&SubscriptionStatus, DateTime<Utc>) -> bool) -> Result<bool> {
        let status = self.store.get_current_status().await?;
        Ok(rule(&status, self.store.clock().now()))
    }
}
