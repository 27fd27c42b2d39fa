//! Closure period endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::closure::{ClosurePeriod, ClosurePeriodQuery, CreateClosurePeriod, UpdateClosurePeriod},
    repository::parse_date,
};

use super::AuthenticatedUser;

/// List closure periods
#[utoipa::path(
    get,
    path = "/closures",
    tag = "closures",
    params(ClosurePeriodQuery),
    responses(
        (status = 200, description = "Closure periods", body = Vec<ClosurePeriod>)
    )
)]
pub async fn list_closures(
    State(state): State<crate::AppState>,
    Query(query): Query<ClosurePeriodQuery>,
) -> AppResult<Json<Vec<ClosurePeriod>>> {
    let start = query.start_date.as_deref().map(|s| parse_date(s, "start_date")).transpose()?;
    let end = query.end_date.as_deref().map(|s| parse_date(s, "end_date")).transpose()?;
    let closures = state.services.closures.list(start, end).await?;
    Ok(Json(closures))
}

/// Get a closure period
#[utoipa::path(
    get,
    path = "/closures/{id}",
    tag = "closures",
    params(("id" = i32, Path, description = "Closure period ID")),
    responses(
        (status = 200, description = "Closure period", body = ClosurePeriod),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_closure(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ClosurePeriod>> {
    let closure = state.services.closures.get(id).await?;
    Ok(Json(closure))
}

/// Create a closure period
#[utoipa::path(
    post,
    path = "/closures",
    tag = "closures",
    security(("bearer_auth" = [])),
    request_body = CreateClosurePeriod,
    responses(
        (status = 201, description = "Closure created", body = ClosurePeriod),
        (status = 400, description = "Invalid dates")
    )
)]
pub async fn create_closure(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateClosurePeriod>,
) -> AppResult<(StatusCode, Json<ClosurePeriod>)> {
    claims.require_admin()?;
    let closure = state.services.closures.create(&data).await?;
    Ok((StatusCode::CREATED, Json(closure)))
}

/// Update a closure period
#[utoipa::path(
    put,
    path = "/closures/{id}",
    tag = "closures",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Closure period ID")),
    request_body = UpdateClosurePeriod,
    responses(
        (status = 200, description = "Closure updated", body = ClosurePeriod)
    )
)]
pub async fn update_closure(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateClosurePeriod>,
) -> AppResult<Json<ClosurePeriod>> {
    claims.require_admin()?;
    let closure = state.services.closures.update(id, &data).await?;
    Ok(Json(closure))
}

/// Delete a closure period
#[utoipa::path(
    delete,
    path = "/closures/{id}",
    tag = "closures",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Closure period ID")),
    responses(
        (status = 204, description = "Closure deleted")
    )
)]
pub async fn delete_closure(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state.services.closures.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
