//! Shop settings model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Persisted shop-wide settings (single row)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ShopSettings {
    /// Days of mandatory advance notice before a rental can start
    pub advance_booking_days: Option<i32>,
    pub modif_date: Option<DateTime<Utc>>,
}

/// Update settings request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateShopSettings {
    #[validate(range(min = 0, max = 365, message = "advance_booking_days must be between 0 and 365"))]
    pub advance_booking_days: i32,
}
