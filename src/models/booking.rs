//! Booking models and availability payloads

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::closure::ClosurePeriod;
use super::enums::BookingStatus;
use crate::booking::{CheckoutNotice, DayStatus, RejectReason};

/// Booking row from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: i32,
    pub reference: Uuid,
    pub equipment_id: i32,
    pub user_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Day the unit is back in stock, after `end_date` for checkout-permitted closure days
    pub return_date: NaiveDate,
    pub status: i16,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

/// Booking as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingDetails {
    pub id: i32,
    pub reference: Uuid,
    pub equipment_id: i32,
    pub user_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub return_date: NaiveDate,
    pub status: BookingStatus,
    pub crea_date: Option<DateTime<Utc>>,
}

impl From<Booking> for BookingDetails {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            reference: b.reference,
            equipment_id: b.equipment_id,
            user_id: b.user_id,
            start_date: b.start_date,
            end_date: b.end_date,
            return_date: b.return_date,
            status: BookingStatus::from(b.status),
            crea_date: b.crea_date,
        }
    }
}

/// Create booking request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBooking {
    pub equipment_id: i32,
    /// First rental day (YYYY-MM-DD)
    pub start_date: NaiveDate,
    /// Last rental day (YYYY-MM-DD)
    pub end_date: NaiveDate,
}

/// Booking creation response
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingCreated {
    pub booking: BookingDetails,
    /// Present when the end day is a checkout-permitted closure day
    pub checkout_notice: Option<CheckoutNotice>,
}

// ---------------------------------------------------------------------------
// Availability
// ---------------------------------------------------------------------------

/// Effective booking rules as currently loaded
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingRulesResponse {
    pub advance_booking_days: u32,
    /// Earliest selectable day, for both start and end
    pub minimum_start_date: NaiveDate,
    pub closures: Vec<ClosurePeriod>,
}

/// Month calendar query
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct CalendarQuery {
    pub year: i32,
    /// Month number (1-12)
    pub month: u32,
    /// Currently chosen start date, if any
    pub start_date: Option<NaiveDate>,
    /// Currently chosen end date, if any
    pub end_date: Option<NaiveDate>,
}

/// Month calendar response, one entry per day
#[derive(Debug, Serialize, ToSchema)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u32,
    pub minimum_start_date: NaiveDate,
    pub days: Vec<DayStatus>,
}

/// Range check request
#[derive(Debug, Deserialize, ToSchema)]
pub struct RangeCheckRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Range check result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RangeCheckResponse {
    pub valid: bool,
    /// Why the range was refused
    pub reason: Option<RejectReason>,
    pub checkout_notice: Option<CheckoutNotice>,
}
