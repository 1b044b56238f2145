//! Ride repository

use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    constants::ride_statuses,
    error::AppResult,
    models::{NewRide, Ride, RideChanges, RideWithModeration, RideWithOwner},
};

/// Filter criteria for the public ride search
///
/// Location terms match case-insensitively as substrings against the direct
/// endpoints and the declared stops; the remaining fields are exact filters.
#[derive(Debug, Default, Clone)]
pub struct RideFilter {
    pub starting_point: Option<String>,
    pub destination: Option<String>,
    pub is_nust_start: Option<bool>,
    pub is_nust_dest: Option<bool>,
    pub days_available: Option<Vec<String>>,
    pub vehicle_type: Option<String>,
}

impl RideFilter {
    /// Substring pattern for ILIKE matching
    pub fn like_pattern(term: &str) -> String {
        format!("%{}%", term)
    }
}

/// Repository for ride database operations
pub struct RideRepository;

impl RideRepository {
    /// Create a new ride
    pub async fn create(pool: &PgPool, ride: &NewRide) -> AppResult<Ride> {
        let created = sqlx::query_as::<_, Ride>(
            r#"
            INSERT INTO rides (
                rider, starting_point, destination, is_nust_start, is_nust_dest, stops,
                ride_frequency, days_available, trip_type, departure_time, return_time, price,
                vehicle_type, vehicle_details, passenger_capacity, preferences, additional_info,
                user_name, student_id, phone_number, is_primary_whatsapp, email,
                preferred_contact_method, share_contact_consent
            )
            VALUES (
                $1, $2, $3, $4, $5, $6,
                $7, $8, $9, $10, $11, $12,
                $13, $14, $15, $16, $17,
                $18, $19, $20, $21, $22,
                $23, $24
            )
            RETURNING *
            "#,
        )
        .bind(ride.rider)
        .bind(&ride.starting_point)
        .bind(&ride.destination)
        .bind(ride.is_nust_start)
        .bind(ride.is_nust_dest)
        .bind(&ride.stops)
        .bind(&ride.ride_frequency)
        .bind(&ride.days_available)
        .bind(&ride.trip_type)
        .bind(&ride.departure_time)
        .bind(ride.return_time.as_deref())
        .bind(&ride.price)
        .bind(&ride.vehicle_type)
        .bind(&ride.vehicle_details)
        .bind(ride.passenger_capacity.as_deref())
        .bind(Json(&ride.preferences))
        .bind(ride.additional_info.as_deref())
        .bind(&ride.user_name)
        .bind(&ride.student_id)
        .bind(&ride.phone_number)
        .bind(ride.is_primary_whatsapp)
        .bind(ride.email.as_deref())
        .bind(&ride.preferred_contact_method)
        .bind(ride.share_contact_consent)
        .fetch_one(pool)
        .await?;

        Ok(created)
    }

    /// Find ride by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Ride>> {
        let ride = sqlx::query_as::<_, Ride>(r#"SELECT * FROM rides WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(ride)
    }

    /// Find ride by ID with the owner's public fields populated
    pub async fn find_by_id_with_owner(
        pool: &PgPool,
        id: &Uuid,
    ) -> AppResult<Option<RideWithOwner>> {
        let ride = sqlx::query_as::<_, RideWithOwner>(
            r#"
            SELECT r.*,
                   u.first_name AS rider_first_name,
                   u.last_name AS rider_last_name,
                   u.email AS rider_email
            FROM rides r
            JOIN users u ON u.id = r.rider
            WHERE r.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(ride)
    }

    /// List active rides, newest first, capped
    pub async fn list_active(pool: &PgPool, limit: i64) -> AppResult<Vec<RideWithOwner>> {
        let rides = sqlx::query_as::<_, RideWithOwner>(
            r#"
            SELECT r.*,
                   u.first_name AS rider_first_name,
                   u.last_name AS rider_last_name,
                   u.email AS rider_email
            FROM rides r
            JOIN users u ON u.id = r.rider
            WHERE r.status = $1
            ORDER BY r.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(ride_statuses::ACTIVE)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(rides)
    }

    /// All rides owned by the given rider, regardless of status
    pub async fn list_by_rider(pool: &PgPool, rider: &Uuid) -> AppResult<Vec<Ride>> {
        let rides = sqlx::query_as::<_, Ride>(
            r#"SELECT * FROM rides WHERE rider = $1 ORDER BY created_at DESC"#,
        )
        .bind(rider)
        .fetch_all(pool)
        .await?;

        Ok(rides)
    }

    /// Search active rides by route overlap and exact filters
    ///
    /// The location match is a four-clause disjunction over direct endpoints
    /// and declared stops. It approximates "does the requested leg overlap
    /// the ride's route" by text containment, not graph reachability.
    pub async fn filter(pool: &PgPool, filter: &RideFilter) -> AppResult<Vec<RideWithOwner>> {
        let start_pattern = filter
            .starting_point
            .as_deref()
            .map(RideFilter::like_pattern);
        let dest_pattern = filter.destination.as_deref().map(RideFilter::like_pattern);

        let rides = sqlx::query_as::<_, RideWithOwner>(
            r#"
            SELECT r.*,
                   u.first_name AS rider_first_name,
                   u.last_name AS rider_last_name,
                   u.email AS rider_email
            FROM rides r
            JOIN users u ON u.id = r.rider
            WHERE r.status = $1
              AND CASE
                    WHEN $2::text IS NOT NULL AND $3::text IS NOT NULL THEN
                         (r.starting_point ILIKE $2 AND r.destination ILIKE $3)
                      OR (r.starting_point ILIKE $2
                          AND EXISTS (SELECT 1 FROM unnest(r.stops) AS s WHERE s ILIKE $3))
                      OR (EXISTS (SELECT 1 FROM unnest(r.stops) AS s WHERE s ILIKE $2)
                          AND r.destination ILIKE $3)
                      OR EXISTS (SELECT 1 FROM unnest(r.stops) AS s
                                 WHERE s ILIKE $2 OR s ILIKE $3)
                    WHEN $2::text IS NOT NULL THEN
                         r.starting_point ILIKE $2
                      OR EXISTS (SELECT 1 FROM unnest(r.stops) AS s WHERE s ILIKE $2)
                    WHEN $3::text IS NOT NULL THEN
                         r.destination ILIKE $3
                      OR EXISTS (SELECT 1 FROM unnest(r.stops) AS s WHERE s ILIKE $3)
                    ELSE TRUE
                  END
              AND ($4::boolean IS NULL OR r.is_nust_start = $4)
              AND ($5::boolean IS NULL OR r.is_nust_dest = $5)
              AND ($6::text[] IS NULL OR r.days_available && $6)
              AND ($7::text IS NULL OR r.vehicle_type = $7)
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(ride_statuses::ACTIVE)
        .bind(start_pattern)
        .bind(dest_pattern)
        .bind(filter.is_nust_start)
        .bind(filter.is_nust_dest)
        .bind(filter.days_available.as_deref())
        .bind(filter.vehicle_type.as_deref())
        .fetch_all(pool)
        .await?;

        Ok(rides)
    }

    /// Sparse-patch ride fields; omitted fields retain prior values
    pub async fn update(pool: &PgPool, id: &Uuid, changes: &RideChanges) -> AppResult<Ride> {
        let preferences = changes.preferences.as_ref().map(Json);

        let ride = sqlx::query_as::<_, Ride>(
            r#"
            UPDATE rides
            SET
                starting_point = COALESCE($2, starting_point),
                destination = COALESCE($3, destination),
                is_nust_start = COALESCE($4, is_nust_start),
                is_nust_dest = COALESCE($5, is_nust_dest),
                stops = COALESCE($6, stops),
                ride_frequency = COALESCE($7, ride_frequency),
                days_available = COALESCE($8, days_available),
                trip_type = COALESCE($9, trip_type),
                departure_time = COALESCE($10, departure_time),
                return_time = COALESCE($11, return_time),
                price = COALESCE($12, price),
                vehicle_type = COALESCE($13, vehicle_type),
                vehicle_details = COALESCE($14, vehicle_details),
                passenger_capacity = COALESCE($15, passenger_capacity),
                preferences = COALESCE($16, preferences),
                additional_info = COALESCE($17, additional_info),
                user_name = COALESCE($18, user_name),
                student_id = COALESCE($19, student_id),
                phone_number = COALESCE($20, phone_number),
                is_primary_whatsapp = COALESCE($21, is_primary_whatsapp),
                email = COALESCE($22, email),
                preferred_contact_method = COALESCE($23, preferred_contact_method),
                status = COALESCE($24, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.starting_point.as_deref())
        .bind(changes.destination.as_deref())
        .bind(changes.is_nust_start)
        .bind(changes.is_nust_dest)
        .bind(changes.stops.as_deref())
        .bind(changes.ride_frequency.as_deref())
        .bind(changes.days_available.as_deref())
        .bind(changes.trip_type.as_deref())
        .bind(changes.departure_time.as_deref())
        .bind(changes.return_time.as_deref())
        .bind(changes.price.as_deref())
        .bind(changes.vehicle_type.as_deref())
        .bind(changes.vehicle_details.as_deref())
        .bind(changes.passenger_capacity.as_deref())
        .bind(preferences)
        .bind(changes.additional_info.as_deref())
        .bind(changes.user_name.as_deref())
        .bind(changes.student_id.as_deref())
        .bind(changes.phone_number.as_deref())
        .bind(changes.is_primary_whatsapp)
        .bind(changes.email.as_deref())
        .bind(changes.preferred_contact_method.as_deref())
        .bind(changes.status.as_deref())
        .fetch_one(pool)
        .await?;

        Ok(ride)
    }

    /// Hard-delete a ride; returns whether a row was removed
    pub async fn delete(pool: &PgPool, id: &Uuid) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM rides WHERE id = $1"#)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// All rides regardless of status, with owner and moderator attribution
    pub async fn list_all_with_moderation(pool: &PgPool) -> AppResult<Vec<RideWithModeration>> {
        let rides = sqlx::query_as::<_, RideWithModeration>(
            r#"
            SELECT r.*,
                   u.first_name AS rider_first_name,
                   u.last_name AS rider_last_name,
                   u.email AS rider_email,
                   m.first_name AS moderator_first_name,
                   m.last_name AS moderator_last_name
            FROM rides r
            JOIN users u ON u.id = r.rider
            LEFT JOIN users m ON m.id = r.last_moderated_by
            ORDER BY r.created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rides)
    }

    /// Flag a ride for review; leaves the lifecycle status untouched
    pub async fn flag(
        pool: &PgPool,
        id: &Uuid,
        reason: &str,
        admin_id: &Uuid,
    ) -> AppResult<Ride> {
        let ride = sqlx::query_as::<_, Ride>(
            r#"
            UPDATE rides
            SET is_flagged = TRUE,
                flag_reason = $2,
                last_moderated_by = $3,
                last_moderated_at = $4,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(reason)
        .bind(admin_id)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(ride)
    }

    /// Apply a moderation decision
    pub async fn moderate(
        pool: &PgPool,
        id: &Uuid,
        moderation_status: &str,
        is_flagged: bool,
        status: &str,
        admin_notes: Option<&str>,
        admin_id: &Uuid,
    ) -> AppResult<Ride> {
        let ride = sqlx::query_as::<_, Ride>(
            r#"
            UPDATE rides
            SET moderation_status = $2,
                is_flagged = $3,
                status = $4,
                admin_notes = COALESCE($5, admin_notes),
                last_moderated_by = $6,
                last_moderated_at = $7,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(moderation_status)
        .bind(is_flagged)
        .bind(status)
        .bind(admin_notes)
        .bind(admin_id)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(ride)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern() {
        assert_eq!(RideFilter::like_pattern("G-11"), "%G-11%");
        assert_eq!(RideFilter::like_pattern(""), "%%");
    }
}
