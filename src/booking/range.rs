//! Booking date range and its validator
//!
//! The range is a single value with three reachable states, so a caller can
//! never observe a start later than the end. The validator decides which days
//! may be picked and applies a pick to a range.
//!
//! Callers are expected to consult `is_start_disabled` / `is_end_disabled`
//! before committing a choice. A choice on a day the rules forbid comes back
//! as `Choice::Rejected` and leaves the range untouched.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::calendar::ClosureCalendar;
use super::lead_time::LeadTime;

/// User-selected `(start, end)` pair for one rental under construction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BookingDateRange {
    #[default]
    Empty,
    StartOnly { start: NaiveDate },
    Complete { start: NaiveDate, end: NaiveDate },
}

impl BookingDateRange {
    /// Rebuild a range from loosely held endpoints.
    ///
    /// An end without a start is dropped, as is an end earlier than the start.
    pub fn from_parts(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        match (start, end) {
            (None, _) => Self::Empty,
            (Some(start), Some(end)) if start <= end => Self::Complete { start, end },
            (Some(start), _) => Self::StartOnly { start },
        }
    }

    pub fn start(&self) -> Option<NaiveDate> {
        match *self {
            Self::Empty => None,
            Self::StartOnly { start } | Self::Complete { start, .. } => Some(start),
        }
    }

    pub fn end(&self) -> Option<NaiveDate> {
        match *self {
            Self::Complete { end, .. } => Some(end),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete { .. })
    }

    /// Set the start. A start after the current end discards the end;
    /// clearing the start clears everything.
    pub fn with_start(self, date: Option<NaiveDate>) -> Self {
        match (date, self.end()) {
            (None, _) => Self::Empty,
            (Some(start), Some(end)) if start <= end => Self::Complete { start, end },
            (Some(start), _) => Self::StartOnly { start },
        }
    }

    /// Set the end. An end before the current start discards the start, and
    /// since an end alone is not a valid state the range becomes empty.
    pub fn with_end(self, date: Option<NaiveDate>) -> Self {
        match (self.start(), date) {
            (None, _) => Self::Empty,
            (Some(start), None) => Self::StartOnly { start },
            (Some(start), Some(end)) if start <= end => Self::Complete { start, end },
            (Some(_), Some(_)) => Self::Empty,
        }
    }
}

/// Advisory raised when the chosen end day is a checkout-permitted closure day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CheckoutNotice {
    pub chosen_date: NaiveDate,
    /// Day the equipment is physically handed back
    pub implied_return_date: NaiveDate,
}

impl CheckoutNotice {
    /// Notice for an end on `chosen_date`, returned the following day.
    /// At `NaiveDate::MAX` there is no following day and the return date
    /// saturates to `chosen_date`.
    pub fn for_end(chosen_date: NaiveDate) -> Self {
        Self {
            chosen_date,
            implied_return_date: chosen_date
                .checked_add_days(Days::new(1))
                .unwrap_or(chosen_date),
        }
    }
}

/// Why a day cannot be picked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Earlier than today plus the advance booking lead time
    BeforeMinimumStart,
    /// The shop is closed on that day
    ShopClosed,
    /// An end was picked before any start
    StartNotChosen,
    /// The end precedes the chosen start
    EndBeforeStart,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            RejectReason::BeforeMinimumStart => "date is earlier than the advance booking lead time allows",
            RejectReason::ShopClosed => "the shop is closed on this date",
            RejectReason::StartNotChosen => "a start date must be chosen first",
            RejectReason::EndBeforeStart => "end date precedes the start date",
        };
        f.write_str(msg)
    }
}

/// Outcome of committing a start or end choice
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Accepted { notice: Option<CheckoutNotice> },
    Rejected(RejectReason),
}

impl Choice {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Choice::Accepted { .. })
    }

    pub fn notice(&self) -> Option<CheckoutNotice> {
        match self {
            Choice::Accepted { notice } => *notice,
            Choice::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<RejectReason> {
        match self {
            Choice::Rejected(reason) => Some(*reason),
            Choice::Accepted { .. } => None,
        }
    }
}

/// Decides which days are selectable as start or end, given the closure
/// calendar and the lead-time floor computed for one `today`.
///
/// Must be rebuilt whenever the closures, the lead time or the day change.
#[derive(Debug, Clone)]
pub struct DateRangeValidator {
    calendar: ClosureCalendar,
    lead_time: LeadTime,
    minimum_start: NaiveDate,
}

impl DateRangeValidator {
    pub fn new(calendar: ClosureCalendar, lead_time: LeadTime, today: NaiveDate) -> Self {
        Self {
            minimum_start: lead_time.minimum_start_date(today),
            calendar,
            lead_time,
        }
    }

    pub fn calendar(&self) -> &ClosureCalendar {
        &self.calendar
    }

    pub fn lead_time(&self) -> LeadTime {
        self.lead_time
    }

    pub fn minimum_start_date(&self) -> NaiveDate {
        self.minimum_start
    }

    fn start_rejection(&self, date: NaiveDate) -> Option<RejectReason> {
        if date < self.minimum_start {
            Some(RejectReason::BeforeMinimumStart)
        } else if self.calendar.is_disabled_for_start(date) {
            Some(RejectReason::ShopClosed)
        } else {
            None
        }
    }

    fn end_rejection(&self, range: &BookingDateRange, date: NaiveDate) -> Option<RejectReason> {
        if date < self.minimum_start {
            return Some(RejectReason::BeforeMinimumStart);
        }
        if self.calendar.is_disabled_for_end(date) {
            return Some(RejectReason::ShopClosed);
        }
        match range.start() {
            None => Some(RejectReason::StartNotChosen),
            Some(start) if date < start => Some(RejectReason::EndBeforeStart),
            Some(_) => None,
        }
    }

    /// Render predicate for a start cell. Days after an already chosen end
    /// are shown disabled even though picking one is accepted.
    pub fn is_start_disabled(&self, range: &BookingDateRange, date: NaiveDate) -> bool {
        self.start_rejection(date).is_some() || range.end().is_some_and(|end| date > end)
    }

    /// Render predicate for an end cell
    pub fn is_end_disabled(&self, range: &BookingDateRange, date: NaiveDate) -> bool {
        self.end_rejection(range, date).is_some()
    }

    /// Commit a start choice. `None` clears the whole range.
    pub fn choose_start(&self, range: &mut BookingDateRange, date: Option<NaiveDate>) -> Choice {
        if let Some(reason) = date.and_then(|d| self.start_rejection(d)) {
            return Choice::Rejected(reason);
        }
        *range = range.with_start(date);
        Choice::Accepted { notice: None }
    }

    /// Commit an end choice. `None` clears the end only.
    pub fn choose_end(&self, range: &mut BookingDateRange, date: Option<NaiveDate>) -> Choice {
        let Some(date) = date else {
            *range = range.with_end(None);
            return Choice::Accepted { notice: None };
        };
        if let Some(reason) = self.end_rejection(range, date) {
            return Choice::Rejected(reason);
        }
        *range = range.with_end(Some(date));
        let notice = self
            .calendar
            .is_checkout_permitted_day(date)
            .then(|| CheckoutNotice::for_end(date));
        Choice::Accepted { notice }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::calendar::tests::{d, period};

    fn validator(lead_days: u32, periods: Vec<crate::models::ClosurePeriod>) -> DateRangeValidator {
        DateRangeValidator::new(ClosureCalendar::new(periods), LeadTime::new(lead_days), d(2024, 6, 10))
    }

    #[test]
    fn test_lead_time_floor_is_inclusive() {
        let v = validator(2, vec![]);
        let range = BookingDateRange::Empty;
        assert_eq!(v.minimum_start_date(), d(2024, 6, 12));
        assert!(v.is_start_disabled(&range, d(2024, 6, 11)));
        assert!(!v.is_start_disabled(&range, d(2024, 6, 12)));
    }

    #[test]
    fn test_days_before_floor_disabled_for_both_ends() {
        let v = validator(3, vec![]);
        let range = BookingDateRange::StartOnly { start: d(2024, 6, 1) };
        for day in [d(2024, 6, 1), d(2024, 6, 10), d(2024, 6, 12)] {
            assert!(v.is_start_disabled(&range, day));
            assert!(v.is_end_disabled(&range, day));
        }
    }

    #[test]
    fn test_end_disabled_without_start() {
        let v = validator(0, vec![]);
        assert!(v.is_end_disabled(&BookingDateRange::Empty, d(2024, 6, 20)));
        let mut range = BookingDateRange::Empty;
        assert_eq!(
            v.choose_end(&mut range, Some(d(2024, 6, 20))),
            Choice::Rejected(RejectReason::StartNotChosen)
        );
        assert_eq!(range, BookingDateRange::Empty);
    }

    #[test]
    fn test_end_before_start_rejected_and_range_untouched() {
        let v = validator(0, vec![]);
        let mut range = BookingDateRange::StartOnly { start: d(2024, 6, 15) };
        assert!(v.is_end_disabled(&range, d(2024, 6, 10)));
        let choice = v.choose_end(&mut range, Some(d(2024, 6, 10)));
        assert_eq!(choice.rejection(), Some(RejectReason::EndBeforeStart));
        assert_eq!(range, BookingDateRange::StartOnly { start: d(2024, 6, 15) });
    }

    #[test]
    fn test_single_day_rental_is_valid() {
        let v = validator(0, vec![]);
        let mut range = BookingDateRange::Empty;
        assert!(v.choose_start(&mut range, Some(d(2024, 6, 15))).is_accepted());
        assert!(!v.is_end_disabled(&range, d(2024, 6, 15)));
        assert!(v.choose_end(&mut range, Some(d(2024, 6, 15))).is_accepted());
        assert_eq!(range, BookingDateRange::Complete { start: d(2024, 6, 15), end: d(2024, 6, 15) });
    }

    #[test]
    fn test_later_start_clears_end() {
        let v = validator(0, vec![]);
        let mut range = BookingDateRange::Complete { start: d(2024, 6, 15), end: d(2024, 6, 20) };
        assert!(v.is_start_disabled(&range, d(2024, 6, 25)));
        let choice = v.choose_start(&mut range, Some(d(2024, 6, 25)));
        assert!(choice.is_accepted());
        assert_eq!(range, BookingDateRange::StartOnly { start: d(2024, 6, 25) });
    }

    #[test]
    fn test_earlier_start_keeps_end() {
        let v = validator(0, vec![]);
        let mut range = BookingDateRange::Complete { start: d(2024, 6, 15), end: d(2024, 6, 20) };
        assert!(v.choose_start(&mut range, Some(d(2024, 6, 12))).is_accepted());
        assert_eq!(range, BookingDateRange::Complete { start: d(2024, 6, 12), end: d(2024, 6, 20) });
    }

    #[test]
    fn test_clearing_start_clears_end() {
        let v = validator(0, vec![]);
        let mut range = BookingDateRange::Complete { start: d(2024, 6, 15), end: d(2024, 6, 20) };
        assert!(v.choose_start(&mut range, None).is_accepted());
        assert_eq!(range, BookingDateRange::Empty);
    }

    #[test]
    fn test_clearing_end_keeps_start() {
        let v = validator(0, vec![]);
        let mut range = BookingDateRange::Complete { start: d(2024, 6, 15), end: d(2024, 6, 20) };
        assert!(v.choose_end(&mut range, None).is_accepted());
        assert_eq!(range, BookingDateRange::StartOnly { start: d(2024, 6, 15) });
    }

    #[test]
    fn test_start_on_closure_rejected_even_if_checkout_permitted() {
        let v = validator(0, vec![period(1, d(2024, 7, 1), d(2024, 7, 5), Some(true))]);
        let mut range = BookingDateRange::Empty;
        assert!(v.is_start_disabled(&range, d(2024, 7, 3)));
        assert_eq!(
            v.choose_start(&mut range, Some(d(2024, 7, 3))),
            Choice::Rejected(RejectReason::ShopClosed)
        );
    }

    #[test]
    fn test_end_on_checkout_permitted_day_emits_notice() {
        let v = validator(0, vec![period(1, d(2024, 7, 1), d(2024, 7, 5), Some(true))]);
        let mut range = BookingDateRange::StartOnly { start: d(2024, 6, 28) };
        assert!(!v.is_end_disabled(&range, d(2024, 7, 3)));
        let choice = v.choose_end(&mut range, Some(d(2024, 7, 3)));
        assert_eq!(
            choice.notice(),
            Some(CheckoutNotice {
                chosen_date: d(2024, 7, 3),
                implied_return_date: d(2024, 7, 4),
            })
        );
        assert_eq!(range.end(), Some(d(2024, 7, 3)));
    }

    #[test]
    fn test_end_on_plain_closure_rejected() {
        let v = validator(0, vec![period(1, d(2024, 7, 1), d(2024, 7, 5), Some(false))]);
        let mut range = BookingDateRange::StartOnly { start: d(2024, 6, 28) };
        assert_eq!(
            v.choose_end(&mut range, Some(d(2024, 7, 3))).rejection(),
            Some(RejectReason::ShopClosed)
        );
    }

    #[test]
    fn test_end_on_open_day_has_no_notice() {
        let v = validator(0, vec![]);
        let mut range = BookingDateRange::StartOnly { start: d(2024, 6, 28) };
        assert_eq!(v.choose_end(&mut range, Some(d(2024, 7, 3))), Choice::Accepted { notice: None });
    }

    #[test]
    fn test_predicates_are_repeatable() {
        let v = validator(1, vec![period(1, d(2024, 6, 14), d(2024, 6, 16), None)]);
        let range = BookingDateRange::StartOnly { start: d(2024, 6, 12) };
        let first: Vec<(bool, bool)> = d(2024, 6, 1)
            .iter_days()
            .take(30)
            .map(|day| (v.is_start_disabled(&range, day), v.is_end_disabled(&range, day)))
            .collect();
        let second: Vec<(bool, bool)> = d(2024, 6, 1)
            .iter_days()
            .take(30)
            .map(|day| (v.is_start_disabled(&range, day), v.is_end_disabled(&range, day)))
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_ordering_invariant_holds_over_any_sequence() {
        let v = validator(0, vec![period(1, d(2024, 6, 20), d(2024, 6, 21), Some(true))]);
        let days: Vec<NaiveDate> = d(2024, 6, 10).iter_days().take(20).collect();
        let mut range = BookingDateRange::Empty;
        for (i, day) in days.iter().enumerate() {
            let pick = days[(i * 7) % days.len()];
            let _ = v.choose_start(&mut range, Some(*day));
            let _ = v.choose_end(&mut range, Some(pick));
            let _ = v.choose_start(&mut range, Some(pick));
            if let (Some(start), Some(end)) = (range.start(), range.end()) {
                assert!(start <= end, "{} > {}", start, end);
            }
        }
    }

    #[test]
    fn test_with_end_before_start_empties_range() {
        let range = BookingDateRange::StartOnly { start: d(2024, 6, 15) };
        assert_eq!(range.with_end(Some(d(2024, 6, 10))), BookingDateRange::Empty);
    }

    #[test]
    fn test_from_parts_drops_invalid_end() {
        assert_eq!(BookingDateRange::from_parts(None, Some(d(2024, 6, 1))), BookingDateRange::Empty);
        assert_eq!(
            BookingDateRange::from_parts(Some(d(2024, 6, 5)), Some(d(2024, 6, 1))),
            BookingDateRange::StartOnly { start: d(2024, 6, 5) }
        );
    }

    #[test]
    fn test_checkout_notice_saturates_at_last_date() {
        assert_eq!(CheckoutNotice::for_end(d(2024, 12, 31)).implied_return_date, d(2025, 1, 1));
        let notice = CheckoutNotice::for_end(NaiveDate::MAX);
        assert_eq!(notice.implied_return_date, NaiveDate::MAX);
    }
}
