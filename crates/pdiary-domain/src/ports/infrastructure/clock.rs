//! Clock Port
//!
//! Every "now" and "today" the engine reasons about comes from here so that
//! expiry, monthly rollover and photo windows can be pinned in tests.

use chrono::{DateTime, NaiveDate, Utc};

/// Source of the current time
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date as the user sees it
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}
