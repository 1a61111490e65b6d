//! Subscription Service Interface
//!
//! The single contract UI and AI-flow code talk to for plan, quota and
//! capability questions. Every operation returns a `Result`; nothing panics
//! across this boundary.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use pdiary_domain::error::Result;
use pdiary_domain::{Capabilities, PurchaseEvent, SubscriptionPlan, SubscriptionStatus};

/// Subscription, quota and entitlement operations
#[async_trait]
pub trait SubscriptionServiceInterface: Send + Sync {
    /// Current subscription record (Basic default before first write)
    async fn get_current_status(&self) -> Result<SubscriptionStatus>;

    /// Overwrite the subscription record
    async fn update_status(&self, status: SubscriptionStatus) -> Result<()>;

    /// Whether one more AI generation is allowed right now
    async fn can_use_ai_generation(&self) -> Result<bool>;

    /// AI generations left this month
    async fn get_remaining_generations(&self) -> Result<u32>;

    /// Consume one AI generation, failing with `QuotaExceeded` when none is left
    async fn increment_ai_usage(&self) -> Result<SubscriptionStatus>;

    /// Zero the monthly counter and restart the usage month
    async fn reset_usage(&self) -> Result<SubscriptionStatus>;

    /// Reset the counter if the usage month has rolled over; returns whether it did
    async fn reset_usage_if_due(&self) -> Result<bool>;

    /// When the usage counter next resets
    async fn get_next_reset_date(&self) -> Result<DateTime<Utc>>;

    /// Premium plan and not expired
    async fn can_access_premium_features(&self) -> Result<bool>;

    /// Writing prompts are offered on every plan
    async fn can_access_writing_prompts(&self) -> Result<bool>;

    /// Advanced photo filters
    async fn can_access_advanced_filters(&self) -> Result<bool>;

    /// Advanced diary analytics
    async fn can_access_advanced_analytics(&self) -> Result<bool>;

    /// All capability answers in one read
    async fn capabilities(&self) -> Result<Capabilities>;

    /// Whether a photo taken at `taken_at` is usable under the current plan
    async fn can_use_photo(&self, taken_at: NaiveDateTime) -> Result<bool>;

    /// Apply a status event pushed by the purchase backend
    async fn apply_purchase_event(&self, event: PurchaseEvent) -> Result<SubscriptionStatus>;

    /// Buy `plan` through the purchase backend and apply the outcome
    async fn purchase_plan(&self, plan: SubscriptionPlan) -> Result<SubscriptionStatus>;

    /// Restore a previous purchase through the purchase backend, if any
    async fn restore_purchases(&self) -> Result<Option<SubscriptionStatus>>;
}
