//! Photo Access Interface

use chrono::{NaiveDate, NaiveDateTime};
use pdiary_domain::error::Result;
use pdiary_domain::{AccessWindow, SubscriptionPlan};

/// Date-window questions about photos, independent of the stored status
pub trait PhotoAccessInterface: Send + Sync {
    /// Oldest capture date `plan` may access today
    fn get_accessible_date_for_plan(&self, plan: SubscriptionPlan) -> Result<NaiveDate>;

    /// Whether a photo taken at `taken_at` is inside `plan`'s window today
    fn is_photo_accessible(&self, taken_at: NaiveDateTime, plan: SubscriptionPlan) -> Result<bool>;

    /// Today's window for `plan`
    fn access_window(&self, plan: SubscriptionPlan) -> Result<AccessWindow>;
}
