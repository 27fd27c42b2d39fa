//! Booking date rules
//!
//! Pure, synchronous decision logic for the rental date picker: which days
//! can start or end a rental, given the shop's closure periods and the
//! advance booking lead time. Nothing here performs I/O or reads the clock;
//! closures, lead time and "today" are always passed in.

pub mod calendar;
pub mod grid;
pub mod lead_time;
pub mod range;

pub use calendar::{
    is_checkout_permitted_day, is_disabled_for_end, is_disabled_for_start, ClosureCalendar,
};
pub use grid::{month_grid, DayStatus};
pub use lead_time::{minimum_start_date, LeadTime};
pub use range::{BookingDateRange, CheckoutNotice, Choice, DateRangeValidator, RejectReason};
