//! Bookings repository

use chrono::{NaiveDate, Utc};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{booking::Booking, enums::BookingStatus},
};

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get booking by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", id)))
    }

    /// List bookings, for one user or for everybody
    pub async fn list(&self, user_id: Option<i32>) -> AppResult<Vec<Booking>> {
        let rows = match user_id {
            Some(uid) => {
                sqlx::query_as::<_, Booking>(
                    "SELECT * FROM bookings WHERE user_id = $1 ORDER BY start_date DESC, id DESC",
                )
                .bind(uid)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Booking>(
                    "SELECT * FROM bookings ORDER BY start_date DESC, id DESC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    /// Insert a booking if a unit of the equipment is free from `start_date`
    /// through `return_date`.
    ///
    /// A unit is occupied until its return day inclusive, so a booking ending
    /// on a checkout-permitted closure day blocks the following day too. The
    /// equipment row is locked for the duration of the check so two concurrent
    /// requests cannot both take the last unit.
    pub async fn create_within_capacity(
        &self,
        equipment_id: i32,
        user_id: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
        return_date: NaiveDate,
    ) -> AppResult<Booking> {
        let mut tx = self.pool.begin().await?;

        let quantity: Option<i32> = sqlx::query_scalar(
            "SELECT quantity FROM equipment WHERE id = $1 AND is_active = TRUE FOR UPDATE",
        )
        .bind(equipment_id)
        .fetch_optional(&mut *tx)
        .await?;
        let quantity = quantity
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", equipment_id)))?;

        let overlapping: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM bookings
            WHERE equipment_id = $1
              AND status <> $2
              AND start_date <= $4
              AND return_date >= $3
            "#,
        )
        .bind(equipment_id)
        .bind(i16::from(BookingStatus::Cancelled))
        .bind(start_date)
        .bind(return_date)
        .fetch_one(&mut *tx)
        .await?;

        if overlapping >= i64::from(quantity) {
            return Err(AppError::Unavailable(format!(
                "All {} unit(s) of equipment {} are booked between {} and {}",
                quantity, equipment_id, start_date, end_date
            )));
        }

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (reference, equipment_id, user_id, start_date, end_date, return_date, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(equipment_id)
        .bind(user_id)
        .bind(start_date)
        .bind(end_date)
        .bind(return_date)
        .bind(i16::from(BookingStatus::Pending))
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(booking)
    }

    /// Mark a booking as cancelled.
    ///
    /// Returns `None` when no row changed, either because the booking does not
    /// exist or because it was already cancelled.
    pub async fn cancel(&self, id: i32) -> AppResult<Option<Booking>> {
        let row = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings SET status = $2, modif_date = $3
            WHERE id = $1 AND status <> $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(i16::from(BookingStatus::Cancelled))
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}
