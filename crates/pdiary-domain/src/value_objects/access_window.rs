//! Photo access window
//!
//! A plan grants access to photos captured within the last
//! `past_photo_access_days` calendar days. Only calendar dates take part in
//! the comparison: the time of day of both "today" and the photo is
//! discarded, and the boundary day itself is inside the window.

use crate::entities::PlanDefinition;
use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// The inclusive range of capture dates a plan may use today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessWindow {
    /// Oldest accessible capture date
    pub earliest_date: NaiveDate,
    /// Date the window was computed for
    pub today: NaiveDate,
}

impl AccessWindow {
    /// Window granted by `plan` on `today`
    pub fn for_plan(plan: &PlanDefinition, today: NaiveDate) -> Self {
        Self {
            earliest_date: accessible_date_for(plan, today),
            today,
        }
    }

    /// Whether a capture date falls inside the window
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.earliest_date
    }

    /// Whether a capture timestamp falls inside the window
    pub fn contains(&self, taken_at: NaiveDateTime) -> bool {
        self.contains_date(taken_at.date())
    }
}

/// Oldest capture date `plan` may access on `today`
pub fn accessible_date_for(plan: &PlanDefinition, today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(plan.past_photo_access_days)))
        .unwrap_or(NaiveDate::MIN)
}

/// Whether a photo taken at `taken_at` is usable under `plan` on `today`
pub fn is_date_accessible(taken_at: NaiveDateTime, plan: &PlanDefinition, today: NaiveDate) -> bool {
    AccessWindow::for_plan(plan, today).contains(taken_at)
}
