//! Admin service
//!
//! Moderation operations over ride listings. Callers are gated by the admin
//! role check in the handlers; ownership checks do not apply here.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::RideRepository,
    error::{AppError, AppResult},
    models::{moderation_transition, Ride, RideWithModeration},
    utils::validation,
};

/// Admin service for ride moderation
pub struct AdminService;

impl AdminService {
    /// All rides regardless of status, with moderator attribution
    pub async fn list_all_rides(pool: &PgPool) -> AppResult<Vec<RideWithModeration>> {
        RideRepository::list_all_with_moderation(pool).await
    }

    /// Flag a ride for review
    pub async fn flag_ride(
        pool: &PgPool,
        id: &Uuid,
        admin_id: &Uuid,
        reason: &str,
    ) -> AppResult<Ride> {
        let reason = validation::sanitize_string(reason);
        if reason.is_empty() {
            return Err(AppError::Validation("Flag reason is required".to_string()));
        }

        if RideRepository::find_by_id(pool, id).await?.is_none() {
            return Err(AppError::NotFound("Ride not found".to_string()));
        }

        RideRepository::flag(pool, id, &reason, admin_id).await
    }

    /// Apply a moderation decision
    ///
    /// A `rejected` decision cancels the ride; since moderation updates never
    /// touch the status otherwise, a cancelled-by-rejection ride stays
    /// cancelled even if a later decision approves it.
    pub async fn moderate_ride(
        pool: &PgPool,
        id: &Uuid,
        admin_id: &Uuid,
        decision: &str,
        notes: Option<&str>,
    ) -> AppResult<Ride> {
        validation::validate_moderation_status(decision)
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let ride = RideRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ride not found".to_string()))?;

        let (is_flagged, status) = moderation_transition(decision, &ride.status);

        let notes = notes.map(validation::sanitize_string);

        RideRepository::moderate(
            pool,
            id,
            decision,
            is_flagged,
            &status,
            notes.as_deref(),
            admin_id,
        )
        .await
    }

    /// Hard delete without an ownership check
    pub async fn delete_ride(pool: &PgPool, id: &Uuid) -> AppResult<()> {
        if !RideRepository::delete(pool, id).await? {
            return Err(AppError::NotFound("Ride not found".to_string()));
        }
        Ok(())
    }
}
