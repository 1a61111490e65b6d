//! Subscription plans and their static definitions

use crate::constants::{
    BASIC_MONTHLY_GENERATION_LIMIT, BASIC_PAST_PHOTO_ACCESS_DAYS,
    PREMIUM_MONTHLY_GENERATION_LIMIT, PREMIUM_PAST_PHOTO_ACCESS_DAYS,
};
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named subscription tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPlan {
    /// Free tier
    Basic,
    /// Premium billed monthly
    PremiumMonthly,
    /// Premium billed yearly
    PremiumYearly,
}

impl SubscriptionPlan {
    /// Every plan in the catalogue, cheapest first
    pub const ALL: [SubscriptionPlan; 3] = [
        SubscriptionPlan::Basic,
        SubscriptionPlan::PremiumMonthly,
        SubscriptionPlan::PremiumYearly,
    ];

    /// Stable identifier used in persisted records and configuration
    pub fn id(self) -> &'static str {
        self.definition().id
    }

    /// Look a plan up by its identifier
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|plan| plan.id() == id)
    }

    /// Static definition of this plan
    pub fn definition(self) -> &'static PlanDefinition {
        match self {
            SubscriptionPlan::Basic => &BASIC,
            SubscriptionPlan::PremiumMonthly => &PREMIUM_MONTHLY,
            SubscriptionPlan::PremiumYearly => &PREMIUM_YEARLY,
        }
    }
}

impl fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SubscriptionPlan {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::from_id(&normalized).ok_or_else(|| {
            Error::invalid_argument(format!(
                "Unknown plan '{s}'. Expected one of: basic, premium_monthly, premium_yearly"
            ))
        })
    }
}

/// Immutable description of what a plan grants
///
/// | Plan | Premium | Generations/month | Photo window (days) | Premium flags |
/// |------|---------|-------------------|---------------------|---------------|
/// | basic | no | 10 | 1 | none |
/// | premium_monthly | yes | 100 | 365 | all |
/// | premium_yearly | yes | 100 | 365 | all |
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanDefinition {
    /// Unique plan identifier
    pub id: &'static str,
    /// Human readable plan name
    pub display_name: &'static str,
    /// Whether the plan unlocks premium capabilities
    pub is_premium: bool,
    /// Maximum AI generations per billing month
    pub monthly_generation_limit: u32,
    /// Days of retroactive photo access, counted back from today
    pub past_photo_access_days: u32,
    /// Full writing prompt catalogue
    pub has_writing_prompts: bool,
    /// Advanced photo filters
    pub has_advanced_filters: bool,
    /// Advanced diary analytics
    pub has_advanced_analytics: bool,
}

static BASIC: PlanDefinition = PlanDefinition {
    id: "basic",
    display_name: "Basic",
    is_premium: false,
    monthly_generation_limit: BASIC_MONTHLY_GENERATION_LIMIT,
    past_photo_access_days: BASIC_PAST_PHOTO_ACCESS_DAYS,
    has_writing_prompts: false,
    has_advanced_filters: false,
    has_advanced_analytics: false,
};

static PREMIUM_MONTHLY: PlanDefinition = PlanDefinition {
    id: "premium_monthly",
    display_name: "Premium (Monthly)",
    is_premium: true,
    monthly_generation_limit: PREMIUM_MONTHLY_GENERATION_LIMIT,
    past_photo_access_days: PREMIUM_PAST_PHOTO_ACCESS_DAYS,
    has_writing_prompts: true,
    has_advanced_filters: true,
    has_advanced_analytics: true,
};

static PREMIUM_YEARLY: PlanDefinition = PlanDefinition {
    id: "premium_yearly",
    display_name: "Premium (Yearly)",
    is_premium: true,
    monthly_generation_limit: PREMIUM_MONTHLY_GENERATION_LIMIT,
    past_photo_access_days: PREMIUM_PAST_PHOTO_ACCESS_DAYS,
    has_writing_prompts: true,
    has_advanced_filters: true,
    has_advanced_analytics: true,
};

impl PlanDefinition {
    /// The whole catalogue, in the same order as [`SubscriptionPlan::ALL`]
    pub fn all() -> [&'static PlanDefinition; 3] {
        SubscriptionPlan::ALL.map(SubscriptionPlan::definition)
    }

    /// Generations left once `used` have been consumed this month
    pub fn remaining_after(&self, used: u32) -> u32 {
        self.monthly_generation_limit.saturating_sub(used)
    }
}
