//! Availability service
//!
//! Loads closure periods and the lead time, then answers date-picker
//! questions with the pure rules in [`crate::booking`]. When the
//! configuration cannot be loaded every day is treated as selectable rather
//! than blocking the picker.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Local, NaiveDate};

use crate::{
    booking::{
        month_grid, BookingDateRange, CheckoutNotice, ClosureCalendar, DateRangeValidator,
        LeadTime, RejectReason,
    },
    error::{AppError, AppResult},
    models::{
        booking::{BookingRulesResponse, CalendarQuery, CalendarResponse, RangeCheckResponse},
        closure::ClosurePeriod,
    },
    repository::Repository,
};

/// Where closure periods and the lead time come from
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRulesSource: Send + Sync {
    async fn load_closures(&self) -> AppResult<Vec<ClosurePeriod>>;

    async fn load_advance_booking_days(&self) -> AppResult<Option<i32>>;
}

#[async_trait]
impl BookingRulesSource for Repository {
    async fn load_closures(&self) -> AppResult<Vec<ClosurePeriod>> {
        self.closures.list(None, None).await
    }

    async fn load_advance_booking_days(&self) -> AppResult<Option<i32>> {
        Ok(self.settings.get().await?.and_then(|s| s.advance_booking_days))
    }
}

/// Current local calendar day. The only place the wall clock is read.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Run a complete `start..=end` choice through the validator, start first.
pub fn evaluate_range(
    validator: &DateRangeValidator,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Option<CheckoutNotice>, RejectReason> {
    let mut range = BookingDateRange::Empty;
    if let Some(reason) = validator.choose_start(&mut range, Some(start)).rejection() {
        return Err(reason);
    }
    let choice = validator.choose_end(&mut range, Some(end));
    match choice.rejection() {
        Some(reason) => Err(reason),
        None => Ok(choice.notice()),
    }
}

#[derive(Clone)]
pub struct AvailabilityService {
    source: Arc<dyn BookingRulesSource>,
}

impl AvailabilityService {
    pub fn new(repository: Repository) -> Self {
        Self::with_source(Arc::new(repository))
    }

    pub fn with_source(source: Arc<dyn BookingRulesSource>) -> Self {
        Self { source }
    }

    /// Load the closure calendar and lead time, substituting an empty
    /// calendar and zero lead time for whichever part fails.
    pub async fn load_rules(&self) -> (ClosureCalendar, LeadTime) {
        let (closures, lead_days) = tokio::join!(
            self.source.load_closures(),
            self.source.load_advance_booking_days()
        );

        let calendar = match closures {
            Ok(periods) => ClosureCalendar::new(periods),
            Err(e) => {
                tracing::warn!("Could not load closure periods, treating shop as open: {}", e);
                ClosureCalendar::empty()
            }
        };

        let lead_time = match lead_days {
            Ok(days) => LeadTime::from_setting(days),
            Err(e) => {
                tracing::warn!("Could not load advance booking days, using none: {}", e);
                LeadTime::default()
            }
        };

        (calendar, lead_time)
    }

    /// Build a validator for `today` from freshly loaded rules
    pub async fn validator(&self, today: NaiveDate) -> DateRangeValidator {
        let (calendar, lead_time) = self.load_rules().await;
        DateRangeValidator::new(calendar, lead_time, today)
    }

    /// Effective rules as seen by the picker
    pub async fn rules(&self, today: NaiveDate) -> BookingRulesResponse {
        let validator = self.validator(today).await;
        BookingRulesResponse {
            advance_booking_days: validator.lead_time().advance_booking_days(),
            minimum_start_date: validator.minimum_start_date(),
            closures: validator.calendar().periods().to_vec(),
        }
    }

    /// Per-day selectability for one month, given the picker's current range
    pub async fn calendar(&self, query: &CalendarQuery, today: NaiveDate) -> AppResult<CalendarResponse> {
        let validator = self.validator(today).await;
        let range = BookingDateRange::from_parts(query.start_date, query.end_date);

        let days = month_grid(&validator, &range, query.year, query.month).ok_or_else(|| {
            AppError::BadRequest(format!("Invalid month {}-{}", query.year, query.month))
        })?;

        Ok(CalendarResponse {
            year: query.year,
            month: query.month,
            minimum_start_date: validator.minimum_start_date(),
            days,
        })
    }

    /// Check whether `start..=end` could be booked today
    pub async fn check_range(&self, start: NaiveDate, end: NaiveDate, today: NaiveDate) -> RangeCheckResponse {
        let validator = self.validator(today).await;
        match evaluate_range(&validator, start, end) {
            Ok(checkout_notice) => RangeCheckResponse {
                valid: true,
                reason: None,
                checkout_notice,
            },
            Err(reason) => {
                tracing::debug!(%start, %end, ?reason, "Date range refused");
                RangeCheckResponse {
                    valid: false,
                    reason: Some(reason),
                    checkout_notice: None,
                }
            }
        }
    }
}
