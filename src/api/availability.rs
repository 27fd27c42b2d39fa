//! Availability endpoints used by the booking date picker

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::booking::{
        BookingRulesResponse, CalendarQuery, CalendarResponse, RangeCheckRequest,
        RangeCheckResponse,
    },
    services::availability::local_today,
};

/// Effective lead time, earliest start day and closures
#[utoipa::path(
    get,
    path = "/availability/rules",
    tag = "availability",
    responses(
        (status = 200, description = "Booking rules", body = BookingRulesResponse)
    )
)]
pub async fn get_rules(State(state): State<crate::AppState>) -> Json<BookingRulesResponse> {
    Json(state.services.availability.rules(local_today()).await)
}

/// Start/end selectability for every day of a month
#[utoipa::path(
    get,
    path = "/availability/calendar",
    tag = "availability",
    params(CalendarQuery),
    responses(
        (status = 200, description = "Month calendar", body = CalendarResponse),
        (status = 400, description = "Invalid month")
    )
)]
pub async fn get_calendar(
    State(state): State<crate::AppState>,
    Query(query): Query<CalendarQuery>,
) -> AppResult<Json<CalendarResponse>> {
    let calendar = state
        .services
        .availability
        .calendar(&query, local_today())
        .await?;
    Ok(Json(calendar))
}

/// Check a complete date range without booking it
#[utoipa::path(
    post,
    path = "/availability/check",
    tag = "availability",
    request_body = RangeCheckRequest,
    responses(
        (status = 200, description = "Range check result", body = RangeCheckResponse)
    )
)]
pub async fn check_range(
    State(state): State<crate::AppState>,
    Json(request): Json<RangeCheckRequest>,
) -> Json<RangeCheckResponse> {
    let result = state
        .services
        .availability
        .check_range(request.start_date, request.end_date, local_today())
        .await;
    Json(result)
}
