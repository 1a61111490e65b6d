//! Domain layer constants
//!
//! Contains constants that are part of the subscription rules and are used
//! by the application layer. Infrastructure-specific constants remain in
//! `pdiary_infrastructure::constants`.

// ============================================================================
// PLAN CATALOGUE CONSTANTS
// ============================================================================

/// Monthly AI generation quota of the free plan
pub const BASIC_MONTHLY_GENERATION_LIMIT: u32 = 10;

/// Days of retroactive photo access on the free plan
pub const BASIC_PAST_PHOTO_ACCESS_DAYS: u32 = 1;

/// Monthly AI generation quota of the premium plans
pub const PREMIUM_MONTHLY_GENERATION_LIMIT: u32 = 100;

/// Days of retroactive photo access on the premium plans
pub const PREMIUM_PAST_PHOTO_ACCESS_DAYS: u32 = 365;

// ============================================================================
// PERSISTENCE KEYS
// ============================================================================

/// Key under which the subscription status record is persisted
pub const SUBSCRIPTION_STATUS_KEY: &str = "subscription_status";

// ============================================================================
// BILLING WINDOW
// ============================================================================

/// Calendar months between two usage counter resets
pub const USAGE_RESET_INTERVAL_MONTHS: u32 = 1;
