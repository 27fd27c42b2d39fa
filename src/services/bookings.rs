//! Booking submission service

use chrono::NaiveDate;

use crate::{
    booking::CheckoutNotice,
    error::{AppError, AppResult},
    models::{
        booking::{BookingCreated, BookingDetails, CreateBooking},
        enums::BookingStatus,
        user::UserClaims,
    },
    repository::Repository,
    services::availability::{evaluate_range, AvailabilityService},
};

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
    availability: AvailabilityService,
}

impl BookingsService {
    pub fn new(repository: Repository, availability: AvailabilityService) -> Self {
        Self { repository, availability }
    }

    /// Submit a booking after re-checking the range with the picker's rules
    pub async fn create(
        &self,
        claims: &UserClaims,
        request: &CreateBooking,
        today: NaiveDate,
    ) -> AppResult<BookingCreated> {
        let validator = self.availability.validator(today).await;
        let checkout_notice = evaluate_range(&validator, request.start_date, request.end_date)
            .map_err(AppError::DateRange)?;
        let return_date = return_date(request.end_date, checkout_notice.as_ref());

        let booking = self
            .repository
            .bookings
            .create_within_capacity(
                request.equipment_id,
                claims.user_id,
                request.start_date,
                request.end_date,
                return_date,
            )
            .await?;

        tracing::info!(
            booking_id = booking.id,
            equipment_id = booking.equipment_id,
            user_id = booking.user_id,
            "Booking {} created for {}..={}",
            booking.reference,
            booking.start_date,
            booking.end_date
        );

        Ok(BookingCreated {
            booking: booking.into(),
            checkout_notice,
        })
    }

    /// Own bookings, or all bookings for admins
    pub async fn list(&self, claims: &UserClaims) -> AppResult<Vec<BookingDetails>> {
        let user_filter = if claims.is_admin() { None } else { Some(claims.user_id) };
        let rows = self.repository.bookings.list(user_filter).await?;
        Ok(rows.into_iter().map(BookingDetails::from).collect())
    }

    pub async fn get(&self, claims: &UserClaims, id: i32) -> AppResult<BookingDetails> {
        let booking = self.repository.bookings.get_by_id(id).await?;
        claims.require_owner(booking.user_id)?;
        Ok(booking.into())
    }

    /// Cancel a booking that has not been cancelled yet
    pub async fn cancel(&self, claims: &UserClaims, id: i32) -> AppResult<BookingDetails> {
        let booking = self.repository.bookings.get_by_id(id).await?;
        claims.require_owner(booking.user_id)?;

        if BookingStatus::from(booking.status) == BookingStatus::Cancelled {
            return Err(AppError::Conflict(format!("Booking {} is already cancelled", id)));
        }

        let cancelled = self
            .repository
            .bookings
            .cancel(id)
            .await?
            .ok_or_else(|| AppError::Conflict(format!("Booking {} is already cancelled", id)))?;
        tracing::info!(booking_id = id, user_id = claims.user_id, "Booking cancelled");
        Ok(cancelled.into())
    }
}

/// Day the unit comes back: the end day, or the day after when the end falls
/// on a checkout-permitted closure day
fn return_date(end_date: NaiveDate, checkout_notice: Option<&CheckoutNotice>) -> NaiveDate {
    checkout_notice.map_or(end_date, |notice| notice.implied_return_date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{ClosureCalendar, DateRangeValidator, LeadTime};
    use crate::models::ClosurePeriod;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn validator(checkout_permitted: bool) -> DateRangeValidator {
        let closure = ClosurePeriod {
            id: 1,
            date_from: d(2024, 7, 1),
            date_to: d(2024, 7, 3),
            checkout_permitted: Some(checkout_permitted),
            reason: None,
            crea_date: None,
            modif_date: None,
        };
        DateRangeValidator::new(ClosureCalendar::new(vec![closure]), LeadTime::default(), d(2024, 6, 1))
    }

    #[test]
    fn test_return_date_is_end_date_on_open_day() {
        let v = validator(true);
        let notice = evaluate_range(&v, d(2024, 6, 20), d(2024, 6, 25)).unwrap();
        assert_eq!(notice, None);
        assert_eq!(return_date(d(2024, 6, 25), notice.as_ref()), d(2024, 6, 25));
    }

    #[test]
    fn test_return_date_moves_past_checkout_closure_day() {
        let v = validator(true);
        let notice = evaluate_range(&v, d(2024, 6, 28), d(2024, 7, 3)).unwrap();
        assert_eq!(return_date(d(2024, 7, 3), notice.as_ref()), d(2024, 7, 4));
    }

    #[test]
    fn test_occupancy_blocks_start_on_return_day() {
        let v = validator(true);
        let notice = evaluate_range(&v, d(2024, 6, 28), d(2024, 7, 3)).unwrap();
        let occupied_until = return_date(d(2024, 7, 3), notice.as_ref());

        // 07-04 is a valid start, so only the capacity check keeps the unit
        assert!(evaluate_range(&v, d(2024, 7, 4), d(2024, 7, 6)).is_ok());
        assert_eq!(occupied_until, d(2024, 7, 4));
    }
}
