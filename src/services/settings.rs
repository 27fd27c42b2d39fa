//! Shop settings service

use validator::Validate;

use crate::{
    error::AppResult,
    models::settings::{ShopSettings, UpdateShopSettings},
    repository::Repository,
};

#[derive(Clone)]
pub struct SettingsService {
    repository: Repository,
}

impl SettingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get current settings, defaulting to no lead time when never saved
    pub async fn get_settings(&self) -> AppResult<ShopSettings> {
        let settings = self.repository.settings.get().await?;
        Ok(settings.unwrap_or(ShopSettings {
            advance_booking_days: Some(0),
            modif_date: None,
        }))
    }

    /// Update settings
    pub async fn update_settings(&self, request: &UpdateShopSettings) -> AppResult<ShopSettings> {
        request.validate()?;
        let settings = self
            .repository
            .settings
            .set_advance_booking_days(request.advance_booking_days)
            .await?;
        tracing::info!(
            advance_booking_days = request.advance_booking_days,
            "Advance booking lead time updated"
        );
        Ok(settings)
    }
}
