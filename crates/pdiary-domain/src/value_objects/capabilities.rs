//! Capability snapshot

use crate::entities::SubscriptionPlan;
use serde::{Deserialize, Serialize};

/// Everything a status currently entitles the user to, read in one go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Active plan
    pub plan: SubscriptionPlan,
    /// Premium features unlocked
    pub premium_features: bool,
    /// Writing prompts available (always true, Basic gets a reduced catalogue)
    pub writing_prompts: bool,
    /// Advanced photo filters unlocked
    pub advanced_filters: bool,
    /// Advanced analytics unlocked
    pub advanced_analytics: bool,
    /// At least one AI generation left
    pub ai_generation: bool,
    /// AI generations left this month
    pub remaining_generations: u32,
}
