//! Lead-time rule: mandatory advance notice before a rental may start

use chrono::{Days, NaiveDate};

/// Earliest permissible start day: `today + advance_booking_days`.
///
/// Saturates at `NaiveDate::MAX`.
pub fn minimum_start_date(today: NaiveDate, advance_booking_days: u32) -> NaiveDate {
    today
        .checked_add_days(Days::new(u64::from(advance_booking_days)))
        .unwrap_or(NaiveDate::MAX)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeadTime {
    advance_booking_days: u32,
}

impl LeadTime {
    pub fn new(advance_booking_days: u32) -> Self {
        Self { advance_booking_days }
    }

    /// Build from the stored setting; missing or negative values mean no lead time.
    pub fn from_setting(value: Option<i32>) -> Self {
        let days = value.and_then(|v| u32::try_from(v).ok()).unwrap_or(0);
        Self::new(days)
    }

    pub fn advance_booking_days(&self) -> u32 {
        self.advance_booking_days
    }

    pub fn minimum_start_date(&self, today: NaiveDate) -> NaiveDate {
        minimum_start_date(today, self.advance_booking_days)
    }
}
