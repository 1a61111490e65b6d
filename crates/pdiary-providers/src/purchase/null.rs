//! Null purchase backend
//!
//! Stand-in for builds without a platform store: every purchase is refused
//! and there is never anything to restore.

use async_trait::async_trait;
use pdiary_domain::error::{Error, Result};
use pdiary_domain::ports::PurchaseBackend;
use pdiary_domain::{PurchaseEvent, SubscriptionPlan};

/// Purchase backend that sells nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPurchaseBackend;

impl NullPurchaseBackend {
    /// Create a null backend
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PurchaseBackend for NullPurchaseBackend {
    async fn purchase(&self, plan: SubscriptionPlan) -> Result<PurchaseEvent> {
        Err(Error::purchase(format!(
            "No purchase backend available to buy {plan}"
        )))
    }

    async fn restore(&self) -> Result<Option<PurchaseEvent>> {
        Ok(None)
    }

    fn backend_name(&self) -> &str {
        "null"
    }
}
