//! Purchase backend events
//!
//! The purchase backend is trusted: each event is applied to the current
//! status as-is, without receipt verification or ledger reconciliation.
//! Whatever the event, the usage counter never ends above the resulting
//! plan's monthly limit.

use crate::entities::{SubscriptionPlan, SubscriptionStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A status change reported by the platform purchase backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PurchaseEvent {
    /// A plan was bought; starts a fresh billing window
    Purchased {
        /// Plan bought
        plan: SubscriptionPlan,
        /// Store transaction identifier
        transaction_id: String,
        /// When the purchase completed
        purchased_at: DateTime<Utc>,
        /// End of the paid period
        expires_at: Option<DateTime<Utc>>,
        /// Whether the store will renew it
        auto_renewal: bool,
    },
    /// An earlier purchase was restored; the usage month carries on
    Restored {
        /// Plan of the restored purchase
        plan: SubscriptionPlan,
        /// Store transaction identifier of the original purchase
        transaction_id: String,
        /// When the original purchase completed
        purchased_at: DateTime<Utc>,
        /// End of the paid period
        expires_at: Option<DateTime<Utc>>,
        /// Whether the store will renew it
        auto_renewal: bool,
    },
    /// The current plan was renewed for another period
    Renewed {
        /// Store transaction identifier of the renewal
        transaction_id: String,
        /// New end of the paid period
        expires_at: DateTime<Utc>,
    },
    /// The user toggled automatic renewal
    AutoRenewalChanged {
        /// New renewal setting
        enabled: bool,
    },
    /// The paid period lapsed without renewal
    Expired,
    /// The purchase was refunded or revoked by the store
    Revoked,
}

impl PurchaseEvent {
    /// Short event name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            PurchaseEvent::Purchased { .. } => "purchased",
            PurchaseEvent::Restored { .. } => "restored",
            PurchaseEvent::Renewed { .. } => "renewed",
            PurchaseEvent::AutoRenewalChanged { .. } => "auto_renewal_changed",
            PurchaseEvent::Expired => "expired",
            PurchaseEvent::Revoked => "revoked",
        }
    }

    /// Status that results from applying this event to `current`
    pub fn apply_to(&self, current: &SubscriptionStatus, now: DateTime<Utc>) -> SubscriptionStatus {
        let mut next = current.clone();
        match self {
            PurchaseEvent::Purchased {
                plan,
                transaction_id,
                purchased_at,
                expires_at,
                auto_renewal,
            } => {
                next.plan = *plan;
                next.is_active = true;
                next.start_date = *purchased_at;
                next.expiry_date = *expires_at;
                next.auto_renewal = *auto_renewal;
                next.monthly_usage_count = 0;
                next.last_reset_date = *purchased_at;
                next.transaction_id = Some(transaction_id.clone());
                next.last_purchase_date = Some(*purchased_at);
            }
            PurchaseEvent::Restored {
                plan,
                transaction_id,
                purchased_at,
                expires_at,
                auto_renewal,
            } => {
                next.plan = *plan;
                next.is_active = true;
                next.start_date = *purchased_at;
                next.expiry_date = *expires_at;
                next.auto_renewal = *auto_renewal;
                next.transaction_id = Some(transaction_id.clone());
                next.last_purchase_date = Some(*purchased_at);
            }
            PurchaseEvent::Renewed {
                transaction_id,
                expires_at,
            } => {
                next.is_active = true;
                next.expiry_date = Some(*expires_at);
                next.transaction_id = Some(transaction_id.clone());
                next.last_purchase_date = Some(now);
            }
            PurchaseEvent::AutoRenewalChanged { enabled } => {
                next.auto_renewal = *enabled;
            }
            PurchaseEvent::Expired => {
                next.is_active = false;
                next.auto_renewal = false;
                next.expiry_date = Some(match current.expiry_date {
                    Some(expiry) if expiry <= now => expiry,
                    _ => now,
                });
            }
            PurchaseEvent::Revoked => {
                next = SubscriptionStatus {
                    monthly_usage_count: current.monthly_usage_count,
                    last_reset_date: current.last_reset_date,
                    ..SubscriptionStatus::basic(now)
                };
            }
        }
        next.monthly_usage_count = next
            .monthly_usage_count
            .min(next.plan_definition().monthly_generation_limit);
        next
    }
}
