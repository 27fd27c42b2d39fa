//! Month grid: both picker predicates evaluated once per calendar cell

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use super::range::{BookingDateRange, DateRangeValidator};

/// Selectability of one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DayStatus {
    pub date: NaiveDate,
    pub start_disabled: bool,
    pub end_disabled: bool,
    /// Covered by at least one closure period
    pub closed: bool,
    /// Returns accepted on this closure day (handover next day)
    pub checkout_permitted: bool,
}

/// All days of `year`/`month`, or `None` if the month does not exist.
pub fn month_grid(
    validator: &DateRangeValidator,
    range: &BookingDateRange,
    year: i32,
    month: u32,
) -> Option<Vec<DayStatus>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let calendar = validator.calendar();

    let days = first
        .iter_days()
        .take_while(|day| day.month() == month)
        .map(|date| DayStatus {
            date,
            start_disabled: validator.is_start_disabled(range, date),
            end_disabled: validator.is_end_disabled(range, date),
            closed: calendar.is_closed_on_any_period(date),
            checkout_permitted: calendar.is_checkout_permitted_day(date),
        })
        .collect();

    Some(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::calendar::tests::{d, period};
    use crate::booking::{ClosureCalendar, LeadTime};

    #[test]
    fn test_grid_covers_whole_month() {
        let v = DateRangeValidator::new(ClosureCalendar::empty(), LeadTime::default(), d(2024, 1, 1));
        let grid = month_grid(&v, &BookingDateRange::Empty, 2024, 2).unwrap();
        assert_eq!(grid.len(), 29);
        assert_eq!(grid[0].date, d(2024, 2, 1));
        assert_eq!(grid[28].date, d(2024, 2, 29));
    }

    #[test]
    fn test_invalid_month_yields_none() {
        let v = DateRangeValidator::new(ClosureCalendar::empty(), LeadTime::default(), d(2024, 1, 1));
        assert!(month_grid(&v, &BookingDateRange::Empty, 2024, 13).is_none());
        assert!(month_grid(&v, &BookingDateRange::Empty, 2024, 0).is_none());
    }

    #[test]
    fn test_grid_flags_match_rules() {
        let calendar = ClosureCalendar::new(vec![period(1, d(2024, 7, 10), d(2024, 7, 11), Some(true))]);
        let v = DateRangeValidator::new(calendar, LeadTime::new(2), d(2024, 7, 1));
        let range = BookingDateRange::StartOnly { start: d(2024, 7, 5) };
        let grid = month_grid(&v, &range, 2024, 7).unwrap();

        let day = |n: u32| &grid[(n - 1) as usize];
        assert!(day(2).start_disabled && day(2).end_disabled);
        assert!(!day(3).start_disabled);
        assert!(day(4).end_disabled);
        assert!(!day(5).end_disabled);
        assert!(day(10).closed && day(10).checkout_permitted);
        assert!(day(10).start_disabled);
        assert!(!day(10).end_disabled);
        assert!(!day(12).closed);
    }
}
