//! Closure periods repository

use chrono::{NaiveDate, Utc};
use sqlx::{Pool, Postgres};

use super::parse_date;
use crate::{
    error::{AppError, AppResult},
    models::closure::{ClosurePeriod, CreateClosurePeriod, UpdateClosurePeriod},
};

#[derive(Clone)]
pub struct ClosuresRepository {
    pool: Pool<Postgres>,
}

impl ClosuresRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List closure periods overlapping an optional window, ordered by first day
    pub async fn list(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> AppResult<Vec<ClosurePeriod>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if start_date.is_some() {
            conditions.push(format!("date_to >= ${}", idx));
            idx += 1;
        }
        if end_date.is_some() {
            conditions.push(format!("date_from <= ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT * FROM closure_periods {} ORDER BY date_from, id",
            where_clause
        );

        let mut builder = sqlx::query_as::<_, ClosurePeriod>(&query);
        if let Some(sd) = start_date { builder = builder.bind(sd); }
        if let Some(ed) = end_date { builder = builder.bind(ed); }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Get a closure period by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<ClosurePeriod> {
        sqlx::query_as::<_, ClosurePeriod>("SELECT * FROM closure_periods WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Closure period {} not found", id)))
    }

    /// Create a closure period
    pub async fn create(&self, data: &CreateClosurePeriod) -> AppResult<ClosurePeriod> {
        let from = parse_date(&data.date_from, "date_from")?;
        let to = parse_date(&data.date_to, "date_to")?;
        ensure_ordered(from, to)?;

        let row = sqlx::query_as::<_, ClosurePeriod>(
            r#"
            INSERT INTO closure_periods (date_from, date_to, checkout_permitted, reason)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(from)
        .bind(to)
        .bind(data.checkout_permitted)
        .bind(&data.reason)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a closure period
    pub async fn update(&self, id: i32, data: &UpdateClosurePeriod) -> AppResult<ClosurePeriod> {
        let current = self.get_by_id(id).await?;

        let from = match data.date_from.as_deref() {
            Some(s) => parse_date(s, "date_from")?,
            None => current.date_from,
        };
        let to = match data.date_to.as_deref() {
            Some(s) => parse_date(s, "date_to")?,
            None => current.date_to,
        };
        ensure_ordered(from, to)?;

        sqlx::query_as::<_, ClosurePeriod>(
            r#"
            UPDATE closure_periods SET
                date_from = $2,
                date_to = $3,
                checkout_permitted = $4,
                reason = $5,
                modif_date = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(from)
        .bind(to)
        .bind(data.checkout_permitted.or(current.checkout_permitted))
        .bind(data.reason.clone().or(current.reason))
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Closure period {} not found", id)))
    }

    /// Delete a closure period
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM closure_periods WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Closure period {} not found", id)));
        }
        Ok(())
    }
}

fn ensure_ordered(from: NaiveDate, to: NaiveDate) -> AppResult<()> {
    if from > to {
        return Err(AppError::Validation(
            "date_from must not be after date_to".to_string(),
        ));
    }
    Ok(())
}
