//! Settings endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::settings::{ShopSettings, UpdateShopSettings},
};

use super::AuthenticatedUser;

/// Get current shop settings
#[utoipa::path(
    get,
    path = "/settings",
    tag = "settings",
    responses(
        (status = 200, description = "Current settings", body = ShopSettings)
    )
)]
pub async fn get_settings(State(state): State<crate::AppState>) -> AppResult<Json<ShopSettings>> {
    let settings = state.services.settings.get_settings().await?;
    Ok(Json(settings))
}

/// Update shop settings
#[utoipa::path(
    put,
    path = "/settings",
    tag = "settings",
    security(("bearer_auth" = [])),
    request_body = UpdateShopSettings,
    responses(
        (status = 200, description = "Settings updated", body = ShopSettings),
        (status = 403, description = "Insufficient permissions")
    )
)]
pub async fn update_settings(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<UpdateShopSettings>,
) -> AppResult<Json<ShopSettings>> {
    claims.require_admin()?;

    let settings = state.services.settings.update_settings(&request).await?;
    Ok(Json(settings))
}
