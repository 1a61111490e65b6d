//! Photo Date Window Evaluator
//!
//! Resolves "today" from the injected clock and applies the domain's
//! access window rules.

use crate::domain_services::PhotoAccessInterface;
use chrono::{NaiveDate, NaiveDateTime};
use pdiary_domain::error::Result;
use pdiary_domain::ports::Clock;
use pdiary_domain::value_objects::accessible_date_for;
use pdiary_domain::{AccessWindow, SubscriptionPlan};
use std::sync::Arc;

/// Answers whether a photo's capture date is inside a plan's window
#[derive(Clone)]
pub struct PhotoDateWindowEvaluator {
    clock: Arc<dyn Clock>,
}

impl PhotoDateWindowEvaluator {
    /// Create an evaluator reading today's date from `clock`
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// `today - past_photo_access_days`, dates only
    pub fn accessible_date(&self, plan: SubscriptionPlan) -> NaiveDate {
        accessible_date_for(plan.definition(), self.clock.today())
    }

    /// Today's window for `plan`
    pub fn window(&self, plan: SubscriptionPlan) -> AccessWindow {
        AccessWindow::for_plan(plan.definition(), self.clock.today())
    }

    /// Inclusive date comparison, time of day ignored
    pub fn is_accessible(&self, taken_at: NaiveDateTime, plan: SubscriptionPlan) -> bool {
        self.window(plan).contains(taken_at)
    }

    /// Keep only the capture timestamps inside `plan`'s window
    pub fn filter_accessible<I>(&self, photos: I, plan: SubscriptionPlan) -> Vec<NaiveDateTime>
    where
        I: IntoIterator<Item = NaiveDateTime>,
    {
        let window = self.window(plan);
        photos
            .into_iter()
            .filter(|taken_at| window.contains(*taken_at))
            .collect()
    }
}

impl PhotoAccessInterface for PhotoDateWindowEvaluator {
    fn get_accessible_date_for_plan(&self, plan: SubscriptionPlan) -> Result<NaiveDate> {
        Ok(self.accessible_date(plan))
    }

    fn is_photo_accessible(&self, taken_at: NaiveDateTime, plan: SubscriptionPlan) -> Result<bool> {
        Ok(self.is_accessible(taken_at, plan))
    }

    fn access_window(&self, plan: SubscriptionPlan) -> Result<AccessWindow> {
        Ok(self.window(plan))
    }
}

impl std::fmt::Debug for PhotoDateWindowEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoDateWindowEvaluator")
            .field("today", &self.clock.today())
            .finish()
    }
}
