//! Shop settings repository (single row, id = 1)

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::settings::ShopSettings};

#[derive(Clone)]
pub struct SettingsRepository {
    pool: Pool<Postgres>,
}

impl SettingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get shop settings; `None` when the row has never been written
    pub async fn get(&self) -> AppResult<Option<ShopSettings>> {
        let row = sqlx::query_as::<_, ShopSettings>(
            "SELECT advance_booking_days, modif_date FROM shop_settings WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Insert or update the advance booking lead time
    pub async fn set_advance_booking_days(&self, days: i32) -> AppResult<ShopSettings> {
        let row = sqlx::query_as::<_, ShopSettings>(
            r#"
            INSERT INTO shop_settings (id, advance_booking_days, modif_date)
            VALUES (1, $1, $2)
            ON CONFLICT (id) DO UPDATE
                SET advance_booking_days = EXCLUDED.advance_booking_days,
                    modif_date = EXCLUDED.modif_date
            RETURNING advance_booking_days, modif_date
            "#,
        )
        .bind(days)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
