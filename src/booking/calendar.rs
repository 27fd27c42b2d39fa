//! Closure calendar
//!
//! Point-in-time membership queries against the configured closure periods.
//! Periods may overlap; a day covered by several periods is treated as the
//! union of them, except for end-date selection where any covering period
//! that permits checkout makes the day selectable.
//!
//! An empty period list never closes anything, which is also what callers get
//! when the closures could not be loaded.

use chrono::NaiveDate;

use crate::models::closure::ClosurePeriod;

/// True if `date` falls within any period, whatever its checkout flag.
/// No new pickups happen on a closure day.
pub fn is_disabled_for_start(date: NaiveDate, periods: &[ClosurePeriod]) -> bool {
    periods.iter().any(|p| p.covers(date))
}

/// True if `date` is covered and none of the covering periods permit checkout.
pub fn is_disabled_for_end(date: NaiveDate, periods: &[ClosurePeriod]) -> bool {
    let mut covered = false;
    for period in periods.iter().filter(|p| p.covers(date)) {
        if period.allows_checkout() {
            return false;
        }
        covered = true;
    }
    covered
}

/// True if `date` falls within a period that permits checkout.
pub fn is_checkout_permitted_day(date: NaiveDate, periods: &[ClosurePeriod]) -> bool {
    periods.iter().any(|p| p.covers(date) && p.allows_checkout())
}

/// Closure periods sorted by first day
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClosureCalendar {
    periods: Vec<ClosurePeriod>,
}

impl ClosureCalendar {
    pub fn new(mut periods: Vec<ClosurePeriod>) -> Self {
        periods.sort_by(|a, b| a.date_from.cmp(&b.date_from).then(a.id.cmp(&b.id)));
        Self { periods }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn periods(&self) -> &[ClosurePeriod] {
        &self.periods
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Generic closure check, ignores the checkout flag
    pub fn is_closed_on_any_period(&self, date: NaiveDate) -> bool {
        self.periods
            .iter()
            .take_while(|p| p.date_from <= date)
            .any(|p| p.covers(date))
    }

    pub fn is_disabled_for_start(&self, date: NaiveDate) -> bool {
        self.is_closed_on_any_period(date)
    }

    pub fn is_disabled_for_end(&self, date: NaiveDate) -> bool {
        is_disabled_for_end(date, &self.periods)
    }

    pub fn is_checkout_permitted_day(&self, date: NaiveDate) -> bool {
        is_checkout_permitted_day(date, &self.periods)
    }
}
