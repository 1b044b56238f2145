//! Moderation handler implementations

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    handlers::rides::response::{AdminRideResponse, DeleteRideResponse},
    middleware::auth::{require_admin, AuthenticatedUser},
    models::Ride,
    services::AdminService,
    state::AppState,
};

use super::request::{FlagRideRequest, ModerateRideRequest};

/// List every ride regardless of status, with moderator attribution
pub async fn list_all_rides(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<Vec<AdminRideResponse>>> {
    require_admin(&auth_user)?;

    let rides = AdminService::list_all_rides(state.db()).await?;

    Ok(Json(rides.into_iter().map(Into::into).collect()))
}

/// Flag a ride for review
pub async fn flag_ride(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<FlagRideRequest>,
) -> AppResult<Json<Ride>> {
    require_admin(&auth_user)?;

    let reason = payload.flag_reason.unwrap_or_default();
    let ride = AdminService::flag_ride(state.db(), &id, &auth_user.id, &reason).await?;

    Ok(Json(ride))
}

/// Apply a moderation decision
pub async fn moderate_ride(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ModerateRideRequest>,
) -> AppResult<Json<Ride>> {
    require_admin(&auth_user)?;

    let decision = payload
        .moderation_status
        .ok_or_else(|| AppError::Validation("Moderation status is required".to_string()))?;

    let ride = AdminService::moderate_ride(
        state.db(),
        &id,
        &auth_user.id,
        &decision,
        payload.admin_notes.as_deref(),
    )
    .await?;

    Ok(Json(ride))
}

/// Hard delete any ride, bypassing the ownership check
pub async fn admin_delete_ride(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DeleteRideResponse>> {
    require_admin(&auth_user)?;

    AdminService::delete_ride(state.db(), &id).await?;

    Ok(Json(DeleteRideResponse {
        success: true,
        message: "Ride deleted by admin".to_string(),
        id: Some(id),
    }))
}
