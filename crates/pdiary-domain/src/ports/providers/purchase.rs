//! Purchase Backend Port
//!
//! Narrow contract over the platform store. The backend owns receipts and
//! billing; the engine only consumes the status events it reports.

use crate::entities::SubscriptionPlan;
use crate::error::Result;
use crate::value_objects::PurchaseEvent;
use async_trait::async_trait;

/// Platform purchase backend
#[async_trait]
pub trait PurchaseBackend: Send + Sync {
    /// Buy `plan`, returning the resulting status event
    async fn purchase(&self, plan: SubscriptionPlan) -> Result<PurchaseEvent>;

    /// Restore a previous purchase, if the store knows of one
    async fn restore(&self) -> Result<Option<PurchaseEvent>>;

    /// Backend name for diagnostics
    fn backend_name(&self) -> &str;
}
