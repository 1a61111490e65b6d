//! Subscription Status Store
//!
//! Durable home of the single [`SubscriptionStatus`] record. The record is
//! stored as JSON under [`SUBSCRIPTION_STATUS_KEY`] in the injected
//! [`StateStoreProvider`]; every storage or decoding failure surfaces as
//! `Error::Persistence`.
//!
//! Read-modify-write cycles go through [`SubscriptionStatusStore::mutate`],
//! which holds the store's mutation lock across the load and the save. Two
//! concurrent increments therefore observe each other and the usage counter
//! can never be pushed past the plan limit.

use chrono::{DateTime, Utc};
use pdiary_domain::SubscriptionStatus;
use pdiary_domain::constants::SUBSCRIPTION_STATUS_KEY;
use pdiary_domain::error::{Error, Result};
use pdiary_domain::ports::{Clock, StateStoreProvider};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Persisted subscription status with serialized mutations
pub struct SubscriptionStatusStore {
    state_store: Arc<dyn StateStoreProvider>,
    clock: Arc<dyn Clock>,
    mutation_lock: Mutex<()>,
}

impl SubscriptionStatusStore {
    /// Create a store over a key-value provider
    pub fn new(state_store: Arc<dyn StateStoreProvider>, clock: Arc<dyn Clock>) -> Self {
        Self {
            state_store,
            clock,
            mutation_lock: Mutex::new(()),
        }
    }

    /// Clock shared with the components built on this store
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Persist the first-launch Basic record if nothing is stored yet
    ///
    /// Idempotent: an existing record is returned untouched.
    pub async fn initialize(&self) -> Result<SubscriptionStatus> {
        let _guard = self.mutation_lock.lock().await;
        if let Some(existing) = self.load().await? {
            debug!(plan = %existing.plan, "Subscription status already initialized");
            return Ok(existing);
        }

        let status = SubscriptionStatus::basic(self.clock.now());
        self.save(&status).await?;
        info!(plan = %status.plan, "Created first-launch subscription status");
        Ok(status)
    }

    /// Last persisted record, or the Basic default if none exists
    pub async fn get_current_status(&self) -> Result<SubscriptionStatus> {
        Ok(self
            .load()
            .await?
            .unwrap_or_else(|| SubscriptionStatus::basic(self.clock.now())))
    }

    /// Overwrite the record
    pub async fn update_status(&self, status: SubscriptionStatus) -> Result<()> {
        let _guard = self.mutation_lock.lock().await;
        self.save(&status).await?;
        debug!(
            plan = %status.plan,
            usage = status.monthly_usage_count,
            "Subscription status updated"
        );
        Ok(())
    }

    /// Next monthly usage boundary of the current record
    pub async fn get_next_reset_date(&self) -> Result<DateTime<Utc>> {
        let status = self.get_current_status().await?;
        status.next_reset_date().ok_or_else(|| {
            Error::internal(format!(
                "Next reset date after {} is out of range",
                status.last_reset_date
            ))
        })
    }

    /// Serialized read-modify-write of the record
    ///
    /// `apply` receives the current record and the current time. Returning
    /// `Ok(Some(next))` persists `next`, `Ok(None)` leaves the record as is
    /// and an error aborts without writing. The record in effect afterwards
    /// is returned.
    pub async fn mutate<F>(&self, apply: F) -> Result<SubscriptionStatus>
    where
        F: FnOnce(&SubscriptionStatus, DateTime<Utc>) -> Result<Option<SubscriptionStatus>> + Send,
    {
        let _guard = self.mutation_lock.lock().await;
        let current = self.get_current_status().await?;
        match apply(&current, self.clock.now())? {
            Some(next) => {
                self.save(&next).await?;
                Ok(next)
            }
            None => Ok(current),
        }
    }

    async fn load(&self) -> Result<Option<SubscriptionStatus>> {
        let bytes = self
            .state_store
            .load(SUBSCRIPTION_STATUS_KEY)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to load subscription status");
                Error::persistence_with_source("Failed to load subscription status", e)
            })?;

        bytes
            .map(|bytes| {
                serde_json::from_slice(&bytes).map_err(|e| {
                    Error::persistence_with_source("Stored subscription status is unreadable", e)
                })
            })
            .transpose()
    }

    async fn save(&self, status: &SubscriptionStatus) -> Result<()> {
        let bytes = serde_json::to_vec(status).map_err(|e| {
            Error::persistence_with_source("Failed to encode subscription status", e)
        })?;

        self.state_store
            .save(SUBSCRIPTION_STATUS_KEY, &bytes)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to save subscription status");
                Error::persistence_with_source("Failed to save subscription status", e)
            })
    }
}

impl std::fmt::Debug for SubscriptionStatusStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionStatusStore")
            .field("state_store", &self.state_store.provider_name())
            .finish_non_exhaustive()
    }
}
