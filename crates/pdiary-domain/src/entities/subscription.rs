//! Persisted subscription status record

use super::plan::{PlanDefinition, SubscriptionPlan};
use crate::constants::USAGE_RESET_INTERVAL_MONTHS;
use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

/// The single subscription record of a device
///
/// Created once at first launch on the Basic plan, then only ever
/// overwritten: by the quota tracker (usage counter) and by purchase
/// backend callbacks (plan and billing window).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionStatus {
    /// Active plan
    pub plan: SubscriptionPlan,
    /// Whether the store reports the subscription as active
    pub is_active: bool,
    /// When the current plan started
    pub start_date: DateTime<Utc>,
    /// When the paid period ends; `None` never expires
    pub expiry_date: Option<DateTime<Utc>>,
    /// Whether the store will renew the subscription
    pub auto_renewal: bool,
    /// AI generations consumed since `last_reset_date`
    pub monthly_usage_count: u32,
    /// Start of the current usage month
    pub last_reset_date: DateTime<Utc>,
    /// Store transaction that produced the current plan
    pub transaction_id: Option<String>,
    /// When the last purchase happened
    pub last_purchase_date: Option<DateTime<Utc>>,
}

impl SubscriptionStatus {
    /// First-launch record: Basic plan, nothing used, never expires
    pub fn basic(now: DateTime<Utc>) -> Self {
        Self {
            plan: SubscriptionPlan::Basic,
            is_active: true,
            start_date: now,
            expiry_date: None,
            auto_renewal: false,
            monthly_usage_count: 0,
            last_reset_date: now,
            transaction_id: None,
            last_purchase_date: None,
        }
    }

    /// Definition of the active plan
    pub fn plan_definition(&self) -> &'static PlanDefinition {
        self.plan.definition()
    }

    /// A record is expired once its expiry date lies strictly in the past
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry_date.is_some_and(|expiry| expiry < now)
    }

    /// Premium plans lose every entitlement once expired
    pub fn is_plan_active(&self, now: DateTime<Utc>) -> bool {
        !(self.plan_definition().is_premium && self.is_expired(now))
    }

    /// Generations left this month, zero once a premium plan has lapsed
    pub fn remaining_generations(&self, now: DateTime<Utc>) -> u32 {
        if !self.is_plan_active(now) {
            return 0;
        }
        self.plan_definition()
            .remaining_after(self.monthly_usage_count)
    }

    /// Plan whose limits actually apply: a lapsed premium plan falls back to Basic
    pub fn effective_plan(&self, now: DateTime<Utc>) -> SubscriptionPlan {
        if self.is_plan_active(now) {
            self.plan
        } else {
            SubscriptionPlan::Basic
        }
    }

    /// Next monthly usage boundary, one calendar month after the last reset
    ///
    /// Day-of-month overflow clamps to the end of the target month
    /// (January 31st resets on the last day of February).
    pub fn next_reset_date(&self) -> Option<DateTime<Utc>> {
        self.last_reset_date
            .checked_add_months(Months::new(USAGE_RESET_INTERVAL_MONTHS))
    }
}
