//! Ride service
//!
//! Creation, querying, and owner-gated mutation of ride offers.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    constants::{contact_methods, frequencies, trip_types, vehicle_types, ACTIVE_RIDES_LIMIT},
    db::repositories::{RideFilter, RideRepository},
    error::{AppError, AppResult},
    handlers::rides::request::{CreateRideRequest, UpdateRideRequest},
    models::{NewRide, Ride, RideWithOwner},
    utils::validation,
};

/// Ride service for business logic
pub struct RideService;

impl RideService {
    /// Create a new ride for the authenticated rider
    pub async fn create_ride(
        pool: &PgPool,
        rider_id: &Uuid,
        payload: CreateRideRequest,
    ) -> AppResult<Ride> {
        let new_ride = Self::validate_create(rider_id, payload)?;
        RideRepository::create(pool, &new_ride).await
    }

    /// Active rides, newest first, capped
    pub async fn list_active_rides(pool: &PgPool) -> AppResult<Vec<RideWithOwner>> {
        RideRepository::list_active(pool, ACTIVE_RIDES_LIMIT).await
    }

    /// All of the caller's rides regardless of status, newest first
    pub async fn list_my_rides(pool: &PgPool, rider_id: &Uuid) -> AppResult<Vec<Ride>> {
        RideRepository::list_by_rider(pool, rider_id).await
    }

    /// Search active rides by route overlap and exact filters
    pub async fn filter_rides(pool: &PgPool, filter: RideFilter) -> AppResult<Vec<RideWithOwner>> {
        RideRepository::filter(pool, &filter).await
    }

    /// Get a single ride with owner populated
    pub async fn get_ride(pool: &PgPool, id: &Uuid) -> AppResult<RideWithOwner> {
        RideRepository::find_by_id_with_owner(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ride not found".to_string()))
    }

    /// Owner-gated sparse update
    ///
    /// Only the fields present in the patch are validated; the merged
    /// document is deliberately not re-validated so a partial patch is never
    /// rejected for fields it does not touch.
    pub async fn update_ride(
        pool: &PgPool,
        id: &Uuid,
        caller_id: &Uuid,
        payload: UpdateRideRequest,
    ) -> AppResult<Ride> {
        let ride = RideRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ride not found".to_string()))?;

        if !ride.is_owned_by(caller_id) {
            return Err(AppError::Forbidden(
                "Not authorized to update this ride".to_string(),
            ));
        }

        Self::validate_patch(&payload)?;

        RideRepository::update(pool, id, &payload.into_changes()).await
    }

    /// Owner-gated hard delete
    pub async fn delete_ride(pool: &PgPool, id: &Uuid, caller_id: &Uuid) -> AppResult<()> {
        let ride = RideRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ride not found".to_string()))?;

        if !ride.is_owned_by(caller_id) {
            return Err(AppError::Forbidden(
                "Not authorized to delete this ride".to_string(),
            ));
        }

        RideRepository::delete(pool, id).await?;
        Ok(())
    }

    /// Validate a creation payload and assemble the insertable ride.
    /// Rules are checked in a fixed order; the first failing rule wins.
    fn validate_create(rider_id: &Uuid, payload: CreateRideRequest) -> AppResult<NewRide> {
        let starting_point = payload.starting_point.unwrap_or_default();
        let destination = payload.destination.unwrap_or_default();
        if starting_point.trim().is_empty() || destination.trim().is_empty() {
            return Err(AppError::Validation(
                "Please provide both starting point and destination".to_string(),
            ));
        }

        if !payload.is_nust_start && !payload.is_nust_dest {
            return Err(AppError::Validation(
                "At least one location must be NUST campus".to_string(),
            ));
        }

        if payload.days_available.is_empty() {
            return Err(AppError::Validation(
                "Please select at least one day".to_string(),
            ));
        }

        let trip_type = payload
            .trip_type
            .unwrap_or_else(|| trip_types::ROUND_TRIP.to_string());
        let return_time = payload.return_time.filter(|t| !t.trim().is_empty());
        if trip_type == trip_types::ROUND_TRIP && return_time.is_none() {
            return Err(AppError::Validation(
                "Return time is required for round trips".to_string(),
            ));
        }

        if !payload.share_contact_consent {
            return Err(AppError::Validation(
                "Contact sharing consent is required".to_string(),
            ));
        }

        let user_name = payload.user_name.unwrap_or_default();
        let student_id = payload.student_id.unwrap_or_default();
        let phone_number = payload.phone_number.unwrap_or_default();
        if user_name.trim().is_empty()
            || student_id.trim().is_empty()
            || phone_number.trim().is_empty()
        {
            return Err(AppError::Validation(
                "Please provide your name, student ID, and phone number".to_string(),
            ));
        }

        let departure_time = payload.departure_time.unwrap_or_default();
        if departure_time.trim().is_empty() {
            return Err(AppError::Validation("Departure time is required".to_string()));
        }

        let price = payload.price.unwrap_or_default();
        if price.trim().is_empty() {
            return Err(AppError::Validation("Price is required".to_string()));
        }

        let vehicle_details = payload.vehicle_details.unwrap_or_default();
        if vehicle_details.trim().is_empty() {
            return Err(AppError::Validation("Vehicle details are required".to_string()));
        }

        let vehicle_type = payload
            .vehicle_type
            .unwrap_or_else(|| vehicle_types::CAR.to_string());
        let passenger_capacity = payload.passenger_capacity.filter(|c| !c.trim().is_empty());
        if vehicle_type == vehicle_types::CAR && passenger_capacity.is_none() {
            return Err(AppError::Validation(
                "Passenger capacity is required for car rides".to_string(),
            ));
        }

        let ride_frequency = payload
            .ride_frequency
            .unwrap_or_else(|| frequencies::MONTHLY.to_string());
        let preferred_contact_method = payload
            .preferred_contact_method
            .unwrap_or_else(|| contact_methods::WHATSAPP.to_string());

        validation::validate_frequency(&ride_frequency)
            .map_err(|e| AppError::Validation(e.to_string()))?;
        validation::validate_trip_type(&trip_type)
            .map_err(|e| AppError::Validation(e.to_string()))?;
        validation::validate_vehicle_type(&vehicle_type)
            .map_err(|e| AppError::Validation(e.to_string()))?;
        validation::validate_contact_method(&preferred_contact_method)
            .map_err(|e| AppError::Validation(e.to_string()))?;

        Ok(NewRide {
            rider: *rider_id,
            starting_point,
            destination,
            is_nust_start: payload.is_nust_start,
            is_nust_dest: payload.is_nust_dest,
            stops: payload.stops,
            ride_frequency,
            days_available: payload.days_available,
            trip_type,
            departure_time,
            return_time,
            price,
            vehicle_type,
            vehicle_details,
            passenger_capacity,
            preferences: payload.preferences.unwrap_or_default(),
            additional_info: payload.additional_info,
            user_name,
            student_id,
            phone_number,
            is_primary_whatsapp: payload.is_primary_whatsapp,
            email: payload.email,
            preferred_contact_method,
            share_contact_consent: payload.share_contact_consent,
        })
    }

    /// Field-level validation for a sparse patch; absent fields are ignored
    fn validate_patch(payload: &UpdateRideRequest) -> AppResult<()> {
        if let Some(starting_point) = &payload.starting_point {
            if starting_point.trim().is_empty() {
                return Err(AppError::Validation(
                    "Starting point cannot be empty".to_string(),
                ));
            }
        }
        if let Some(destination) = &payload.destination {
            if destination.trim().is_empty() {
                return Err(AppError::Validation(
                    "Destination cannot be empty".to_string(),
                ));
            }
        }
        if let Some(days) = &payload.days_available {
            if days.is_empty() {
                return Err(AppError::Validation(
                    "Please select at least one day".to_string(),
                ));
            }
        }
        if let Some(frequency) = &payload.ride_frequency {
            validation::validate_frequency(frequency)
                .map_err(|e| AppError::Validation(e.to_string()))?;
        }
        if let Some(trip_type) = &payload.trip_type {
            validation::validate_trip_type(trip_type)
                .map_err(|e| AppError::Validation(e.to_string()))?;
        }
        if let Some(vehicle_type) = &payload.vehicle_type {
            validation::validate_vehicle_type(vehicle_type)
                .map_err(|e| AppError::Validation(e.to_string()))?;
        }
        if let Some(method) = &payload.preferred_contact_method {
            validation::validate_contact_method(method)
                .map_err(|e| AppError::Validation(e.to_string()))?;
        }
        if let Some(status) = &payload.status {
            validation::validate_ride_status(status)
                .map_err(|e| AppError::Validation(e.to_string()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_payload() -> CreateRideRequest {
        CreateRideRequest {
            starting_point: Some("G-11 Markaz".to_string()),
            destination: Some("NUST H-12".to_string()),
            is_nust_start: false,
            is_nust_dest: true,
            stops: vec!["F-10".to_string(), "G-9".to_string()],
            ride_frequency: None,
            days_available: vec!["monday".to_string(), "wednesday".to_string()],
            trip_type: Some("round-trip".to_string()),
            departure_time: Some("08:00".to_string()),
            return_time: Some("17:00".to_string()),
            price: Some("150".to_string()),
            vehicle_type: Some("car".to_string()),
            vehicle_details: Some("White Corolla".to_string()),
            passenger_capacity: Some("3".to_string()),
            preferences: None,
            additional_info: None,
            user_name: Some("Ada".to_string()),
            student_id: Some("NUST-2021-001".to_string()),
            phone_number: Some("03001234567".to_string()),
            is_primary_whatsapp: true,
            email: None,
            preferred_contact_method: None,
            share_contact_consent: true,
        }
    }

    fn first_error(payload: CreateRideRequest) -> String {
        match RideService::validate_create(&Uuid::new_v4(), payload) {
            Err(AppError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_create_accepts_valid_payload() {
        let ride = RideService::validate_create(&Uuid::new_v4(), valid_payload()).unwrap();
        // Defaults fill the omitted enum fields
        assert_eq!(ride.ride_frequency, "monthly");
        assert_eq!(ride.preferred_contact_method, "whatsapp");
        assert_eq!(ride.trip_type, "round-trip");
    }

    #[test]
    fn test_create_requires_endpoints() {
        let mut payload = valid_payload();
        payload.starting_point = None;
        assert_eq!(
            first_error(payload),
            "Please provide both starting point and destination"
        );
    }

    #[test]
    fn test_create_requires_nust_endpoint() {
        let mut payload = valid_payload();
        payload.is_nust_start = false;
        payload.is_nust_dest = false;
        assert_eq!(first_error(payload), "At least one location must be NUST campus");
    }

    #[test]
    fn test_create_requires_days() {
        let mut payload = valid_payload();
        payload.days_available = vec![];
        assert_eq!(first_error(payload), "Please select at least one day");
    }

    #[test]
    fn test_round_trip_requires_return_time() {
        let mut payload = valid_payload();
        payload.return_time = None;
        assert_eq!(first_error(payload), "Return time is required for round trips");

        // The identical payload passes as a one-way trip
        let mut payload = valid_payload();
        payload.return_time = None;
        payload.trip_type = Some("one-way".to_string());
        assert!(RideService::validate_create(&Uuid::new_v4(), payload).is_ok());
    }

    #[test]
    fn test_create_requires_consent() {
        let mut payload = valid_payload();
        payload.share_contact_consent = false;
        assert_eq!(first_error(payload), "Contact sharing consent is required");
    }

    #[test]
    fn test_create_requires_contact_fields() {
        let mut payload = valid_payload();
        payload.phone_number = None;
        assert_eq!(
            first_error(payload),
            "Please provide your name, student ID, and phone number"
        );
    }

    #[test]
    fn test_car_requires_capacity_but_bike_does_not() {
        let mut payload = valid_payload();
        payload.passenger_capacity = None;
        assert_eq!(first_error(payload), "Passenger capacity is required for car rides");

        let mut payload = valid_payload();
        payload.vehicle_type = Some("bike".to_string());
        payload.passenger_capacity = None;
        assert!(RideService::validate_create(&Uuid::new_v4(), payload).is_ok());
    }

    #[test]
    fn test_create_rejects_unknown_enum_values() {
        let mut payload = valid_payload();
        payload.ride_frequency = Some("hourly".to_string());
        assert_eq!(first_error(payload), "Invalid ride frequency");
    }

    #[test]
    fn test_patch_validates_present_fields_only() {
        // An empty patch carries no rules to break
        let empty = UpdateRideRequest::default();
        assert!(RideService::validate_patch(&empty).is_ok());

        // A patch may omit required creation fields entirely
        let partial = UpdateRideRequest {
            price: Some("200".to_string()),
            ..Default::default()
        };
        assert!(RideService::validate_patch(&partial).is_ok());

        let bad_days = UpdateRideRequest {
            days_available: Some(vec![]),
            ..Default::default()
        };
        assert!(RideService::validate_patch(&bad_days).is_err());

        let bad_status = UpdateRideRequest {
            status: Some("archived".to_string()),
            ..Default::default()
        };
        assert!(RideService::validate_patch(&bad_status).is_err());
    }
}
