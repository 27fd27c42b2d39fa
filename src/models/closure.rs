//! Closure period models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// A contiguous span of days during which the shop is closed.
///
/// Both bounds are inclusive. When `checkout_permitted` is set, the days still
/// block new rental starts but may be chosen as rental ends (the equipment is
/// then handed back the following day).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ClosurePeriod {
    pub id: i32,
    /// First closed day
    pub date_from: NaiveDate,
    /// Last closed day
    pub date_to: NaiveDate,
    /// Returns allowed during the closure (absent means no)
    pub checkout_permitted: Option<bool>,
    /// Reason shown to customers
    pub reason: Option<String>,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

impl ClosurePeriod {
    /// Whether `date` lies within `[date_from, date_to]`
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.date_from <= date && date <= self.date_to
    }

    pub fn allows_checkout(&self) -> bool {
        self.checkout_permitted.unwrap_or(false)
    }
}

/// Create closure period request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateClosurePeriod {
    /// First closed day (YYYY-MM-DD)
    pub date_from: String,
    /// Last closed day (YYYY-MM-DD)
    pub date_to: String,
    pub checkout_permitted: Option<bool>,
    #[validate(length(max = 255, message = "Reason must be at most 255 characters"))]
    pub reason: Option<String>,
}

/// Update closure period request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateClosurePeriod {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub checkout_permitted: Option<bool>,
    #[validate(length(max = 255, message = "Reason must be at most 255 characters"))]
    pub reason: Option<String>,
}

/// Query parameters for closure listing
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ClosurePeriodQuery {
    /// Only closures ending on or after this date (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// Only closures starting on or before this date (YYYY-MM-DD)
    pub end_date: Option<String>,
}
