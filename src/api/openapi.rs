//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{availability, bookings, closures, equipment, health, settings};

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "RentDesk API",
        version = "0.3.0",
        description = "Equipment rental booking REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Availability
        availability::get_rules,
        availability::get_calendar,
        availability::check_range,
        // Closures
        closures::list_closures,
        closures::get_closure,
        closures::create_closure,
        closures::update_closure,
        closures::delete_closure,
        // Settings
        settings::get_settings,
        settings::update_settings,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        // Bookings
        bookings::create_booking,
        bookings::list_bookings,
        bookings::get_booking,
        bookings::cancel_booking,
    ),
    components(
        schemas(
            // Availability
            crate::models::booking::BookingRulesResponse,
            crate::models::booking::CalendarQuery,
            crate::models::booking::CalendarResponse,
            crate::models::booking::RangeCheckRequest,
            crate::models::booking::RangeCheckResponse,
            crate::booking::DayStatus,
            crate::booking::CheckoutNotice,
            crate::booking::RejectReason,
            // Closures
            crate::models::closure::ClosurePeriod,
            crate::models::closure::ClosurePeriodQuery,
            crate::models::closure::CreateClosurePeriod,
            crate::models::closure::UpdateClosurePeriod,
            // Settings
            crate::models::settings::ShopSettings,
            crate::models::settings::UpdateShopSettings,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            equipment::EquipmentQuery,
            // Bookings
            crate::models::booking::CreateBooking,
            crate::models::booking::BookingCreated,
            crate::models::booking::BookingDetails,
            crate::models::enums::BookingStatus,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "availability", description = "Booking date rules for the picker"),
        (name = "closures", description = "Shop closure periods"),
        (name = "settings", description = "Shop settings"),
        (name = "equipment", description = "Rental catalog"),
        (name = "bookings", description = "Rental bookings")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
