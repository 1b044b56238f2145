//! Ride handler implementations

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    models::Ride,
    services::RideService,
    state::AppState,
};

use super::{
    request::{CreateRideRequest, FilterRidesQuery, UpdateRideRequest},
    response::{CreateRideResponse, DeleteRideResponse, RideWithOwnerResponse},
};

/// Create a new ride
pub async fn create_ride(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateRideRequest>,
) -> AppResult<(StatusCode, Json<CreateRideResponse>)> {
    let ride = RideService::create_ride(state.db(), &auth_user.id, payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateRideResponse { success: true, ride }),
    ))
}

/// List active rides (public, capped, newest first)
pub async fn list_rides(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<RideWithOwnerResponse>>> {
    let rides = RideService::list_active_rides(state.db()).await?;

    Ok(Json(rides.into_iter().map(Into::into).collect()))
}

/// List the caller's rides regardless of status
pub async fn list_my_rides(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<Vec<Ride>>> {
    let rides = RideService::list_my_rides(state.db(), &auth_user.id).await?;

    Ok(Json(rides))
}

/// Search active rides by route overlap and exact filters
pub async fn filter_rides(
    State(state): State<AppState>,
    Query(query): Query<FilterRidesQuery>,
) -> AppResult<Json<Vec<RideWithOwnerResponse>>> {
    let rides = RideService::filter_rides(state.db(), query.into_filter()).await?;

    Ok(Json(rides.into_iter().map(Into::into).collect()))
}

/// Get a single ride
pub async fn get_ride(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<RideWithOwnerResponse>> {
    let ride = RideService::get_ride(state.db(), &id).await?;

    Ok(Json(ride.into()))
}

/// Owner-gated sparse update
pub async fn update_ride(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRideRequest>,
) -> AppResult<Json<Ride>> {
    let ride = RideService::update_ride(state.db(), &id, &auth_user.id, payload).await?;

    Ok(Json(ride))
}

/// Owner-gated hard delete
pub async fn delete_ride(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DeleteRideResponse>> {
    RideService::delete_ride(state.db(), &id, &auth_user.id).await?;

    Ok(Json(DeleteRideResponse {
        success: true,
        message: "Ride deleted successfully".to_string(),
        id: None,
    }))
}
