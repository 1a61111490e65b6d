//! Sandbox purchase backend
//!
//! Grants every purchase immediately, the way a store sandbox account does.
//! Paid periods follow the plan's billing cycle (one month or one year from
//! the purchase). The last purchase is kept as a receipt in a state store,
//! so it can be restored by a later process.

use async_trait::async_trait;
use chrono::{DateTime, Months, Utc};
use pdiary_domain::error::{Error, Result};
use pdiary_domain::ports::{Clock, PurchaseBackend, StateStoreProvider};
use pdiary_domain::{PurchaseEvent, SubscriptionPlan};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Key the last sandbox receipt is stored under
pub const SANDBOX_RECEIPT_KEY: &str = "sandbox_receipt";

/// Last approved sandbox purchase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SandboxReceipt {
    /// Plan bought
    pub plan: SubscriptionPlan,
    /// Store transaction identifier
    pub transaction_id: String,
    /// When the purchase completed
    pub purchased_at: DateTime<Utc>,
    /// End of the paid period
    pub expires_at: DateTime<Utc>,
}

/// Purchase backend that approves every request
pub struct SandboxPurchaseBackend {
    clock: Arc<dyn Clock>,
    receipts: Arc<dyn StateStoreProvider>,
}

impl SandboxPurchaseBackend {
    /// Create a sandbox backend stamping events with `clock` and keeping
    /// its receipt in `receipts`
    pub fn new(clock: Arc<dyn Clock>, receipts: Arc<dyn StateStoreProvider>) -> Self {
        Self { clock, receipts }
    }

    /// Receipt of the last approved purchase, if any
    pub async fn last_receipt(&self) -> Result<Option<SandboxReceipt>> {
        let Some(bytes) = self.receipts.load(SANDBOX_RECEIPT_KEY).await? else {
            return Ok(None);
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| Error::persistence_with_source("Stored sandbox receipt is unreadable", e))
    }

    async fn save_receipt(&self, receipt: &SandboxReceipt) -> Result<()> {
        let bytes = serde_json::to_vec(receipt)
            .map_err(|e| Error::persistence_with_source("Failed to encode sandbox receipt", e))?;
        self.receipts.save(SANDBOX_RECEIPT_KEY, &bytes).await
    }

    fn billing_period(plan: SubscriptionPlan) -> Option<Months> {
        match plan {
            SubscriptionPlan::Basic => None,
            SubscriptionPlan::PremiumMonthly => Some(Months::new(1)),
            SubscriptionPlan::PremiumYearly => Some(Months::new(12)),
        }
    }
}

#[async_trait]
impl PurchaseBackend for SandboxPurchaseBackend {
    async fn purchase(&self, plan: SubscriptionPlan) -> Result<PurchaseEvent> {
        let Some(period) = Self::billing_period(plan) else {
            return Err(Error::purchase(format!("Plan {plan} is free and cannot be bought")));
        };

        let purchased_at = self.clock.now();
        let expires_at = purchased_at
            .checked_add_months(period)
            .ok_or_else(|| Error::purchase("Paid period ends out of range"))?;

        let receipt = SandboxReceipt {
            plan,
            transaction_id: format!("sandbox-{}", uuid::Uuid::new_v4()),
            purchased_at,
            expires_at,
        };
        self.save_receipt(&receipt).await?;
        debug!(plan = %plan, transaction = %receipt.transaction_id, "Sandbox purchase approved");

        Ok(PurchaseEvent::Purchased {
            plan,
            transaction_id: receipt.transaction_id,
            purchased_at,
            expires_at: Some(expires_at),
            auto_renewal: true,
        })
    }

    async fn restore(&self) -> Result<Option<PurchaseEvent>> {
        Ok(self.last_receipt().await?.map(|receipt| PurchaseEvent::Restored {
            plan: receipt.plan,
            transaction_id: receipt.transaction_id,
            purchased_at: receipt.purchased_at,
            expires_at: Some(receipt.expires_at),
            auto_renewal: true,
        }))
    }

    fn backend_name(&self) -> &str {
        "sandbox"
    }
}

impl std::fmt::Debug for SandboxPurchaseBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SandboxPurchaseBackend")
            .field("receipts", &self.receipts.provider_name())
            .finish_non_exhaustive()
    }
}
