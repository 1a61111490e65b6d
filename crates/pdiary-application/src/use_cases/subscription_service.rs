//! Subscription Service Use Case
//!
//! Composes the status store, the quota tracker, the access control manager
//! and the photo window evaluator behind [`SubscriptionServiceInterface`],
//! and bridges purchase backend events onto the status record.

use super::access_control::AccessControlManager;
use super::photo_window::PhotoDateWindowEvaluator;
use super::status_store::SubscriptionStatusStore;
use super::usage_quota::UsageQuotaTracker;
use crate::domain_services::{PhotoAccessInterface, SubscriptionServiceInterface};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use pdiary_domain::error::Result;
use pdiary_domain::ports::{Clock, PurchaseBackend, StateStoreProvider};
use pdiary_domain::{
    AccessWindow, Capabilities, PurchaseEvent, SubscriptionPlan, SubscriptionStatus,
};
use std::sync::Arc;
use tracing::info;

/// Subscription service implementation
pub struct SubscriptionService {
    store: Arc<SubscriptionStatusStore>,
    quota: UsageQuotaTracker,
    access: AccessControlManager,
    photos: PhotoDateWindowEvaluator,
    purchases: Arc<dyn PurchaseBackend>,
}

impl SubscriptionService {
    /// Create the service with injected collaborators
    pub fn new(
        state_store: Arc<dyn StateStoreProvider>,
        clock: Arc<dyn Clock>,
        purchases: Arc<dyn PurchaseBackend>,
    ) -> Self {
        let store = Arc::new(SubscriptionStatusStore::new(state_store, clock.clone()));
        Self {
            quota: UsageQuotaTracker::new(store.clone()),
            access: AccessControlManager::new(store.clone()),
            photos: PhotoDateWindowEvaluator::new(clock),
            store,
            purchases,
        }
    }

    /// Create the service and persist the first-launch record if needed
    pub async fn initialized(
        state_store: Arc<dyn StateStoreProvider>,
        clock: Arc<dyn Clock>,
        purchases: Arc<dyn PurchaseBackend>,
    ) -> Result<Self> {
        let service = Self::new(state_store, clock, purchases);
        service.store.initialize().await?;
        Ok(service)
    }
}

#[async_trait]
impl SubscriptionServiceInterface for SubscriptionService {
    async fn get_current_status(&self) -> Result<SubscriptionStatus> {
        self.store.get_current_status().await
    }

    async fn update_status(&self, status: SubscriptionStatus) -> Result<()> {
        self.store.update_status(status).await
    }

    async fn can_use_ai_generation(&self) -> Result<bool> {
        self.quota.can_use_ai_generation().await
    }

    async fn get_remaining_generations(&self) -> Result<u32> {
        self.quota.get_remaining_generations().await
    }

    async fn increment_ai_usage(&self) -> Result<SubscriptionStatus> {
        self.quota.increment_ai_usage().await
    }

    async fn reset_usage(&self) -> Result<SubscriptionStatus> {
        self.quota.reset_usage().await
    }

    async fn reset_usage_if_due(&self) -> Result<bool> {
        self.quota.reset_usage_if_due().await
    }

    async fn get_next_reset_date(&self) -> Result<DateTime<Utc>> {
        self.store.get_next_reset_date().await
    }

    async fn can_access_premium_features(&self) -> Result<bool> {
        self.access.can_access_premium_features().await
    }

    async fn can_access_writing_prompts(&self) -> Result<bool> {
        self.access.can_access_writing_prompts().await
    }

    async fn can_access_advanced_filters(&self) -> Result<bool> {
        self.access.can_access_advanced_filters().await
    }

    async fn can_access_advanced_analytics(&self) -> Result<bool> {
        self.access.can_access_advanced_analytics().await
    }

    async fn capabilities(&self) -> Result<Capabilities> {
        self.access.capabilities().await
    }

    async fn can_use_photo(&self, taken_at: NaiveDateTime) -> Result<bool> {
        let status = self.store.get_current_status().await?;
        let plan = status.effective_plan(self.store.clock().now());
        Ok(self.photos.is_accessible(taken_at, plan))
    }

    async fn apply_purchase_event(&self, event: PurchaseEvent) -> Result<SubscriptionStatus> {
        let kind = event.kind();
        let status = self
            .store
            .mutate(|current, now| Ok(Some(event.apply_to(current, now))))
            .await?;
        info!(
            event = kind,
            plan = %status.plan,
            active = status.is_active,
            "Applied purchase event"
        );
        Ok(status)
    }

    async fn purchase_plan(&self, plan: SubscriptionPlan) -> Result<SubscriptionStatus> {
        info!(plan = %plan, backend = self.purchases.backend_name(), "Purchasing plan");
        let event = self.purchases.purchase(plan).await?;
        self.apply_purchase_event(event).await
    }

    async fn restore_purchases(&self) -> Result<Option<SubscriptionStatus>> {
        match self.purchases.restore().await? {
            Some(event) => self.apply_purchase_event(event).await.map(Some),
            None => {
                info!(backend = self.purchases.backend_name(), "No purchase to restore");
                Ok(None)
            }
        }
    }
}

impl PhotoAccessInterface for SubscriptionService {
    fn get_accessible_date_for_plan(&self, plan: SubscriptionPlan) -> Result<NaiveDate> {
        self.photos.get_accessible_date_for_plan(plan)
    }

    fn is_photo_accessible(&self, taken_at: NaiveDateTime, plan: SubscriptionPlan) -> Result<bool> {
        self.photos.is_photo_accessible(taken_at, plan)
    }

    fn access_window(&self, plan: SubscriptionPlan) -> Result<AccessWindow> {
        self.photos.access_window(plan)
    }
}

impl std::fmt::Debug for SubscriptionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionService")
            .field("store", &self.store)
            .field("purchases", &self.purchases.backend_name())
            .finish_non_exhaustive()
    }
}
