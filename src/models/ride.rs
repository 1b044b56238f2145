//! Ride model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::constants::{moderation_statuses, ride_statuses};

/// Ride database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ride {
    pub id: Uuid,
    pub rider: Uuid,

    // Route
    pub starting_point: String,
    pub destination: String,
    pub is_nust_start: bool,
    pub is_nust_dest: bool,
    pub stops: Vec<String>,

    // Schedule
    pub ride_frequency: String,
    pub days_available: Vec<String>,
    pub trip_type: String,
    pub departure_time: String,
    pub return_time: Option<String>,
    pub price: String,

    // Vehicle
    pub vehicle_type: String,
    pub vehicle_details: String,
    pub passenger_capacity: Option<String>,
    pub preferences: Json<RidePreferences>,
    pub additional_info: Option<String>,

    // Contact
    pub user_name: String,
    pub student_id: String,
    pub phone_number: String,
    pub is_primary_whatsapp: bool,
    pub email: Option<String>,
    pub preferred_contact_method: String,
    pub share_contact_consent: bool,

    // Lifecycle
    pub status: String,

    // Moderation
    pub is_flagged: bool,
    pub flag_reason: String,
    pub moderation_status: String,
    pub admin_notes: String,
    pub last_moderated_by: Option<Uuid>,
    pub last_moderated_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ride {
    /// Whether the given user owns this ride
    pub fn is_owned_by(&self, user_id: &Uuid) -> bool {
        self.rider == *user_id
    }
}

/// Vehicle-specific rider preferences, stored as JSONB
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RidePreferences {
    #[serde(default)]
    pub car: CarPreferences,
    #[serde(default)]
    pub bike: BikePreferences,
}

/// Preferences that only apply to car rides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarPreferences {
    #[serde(default)]
    pub air_conditioned: bool,
    #[serde(default)]
    pub smoking_allowed: bool,
    #[serde(default)]
    pub pets_allowed: bool,
    #[serde(default)]
    pub music_allowed: bool,
}

/// Preferences that only apply to bike rides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BikePreferences {
    #[serde(default)]
    pub helmet_provided: bool,
    #[serde(default)]
    pub rain_gear_available: bool,
}

/// Ride row joined with the owning rider's public fields
#[derive(Debug, Clone, FromRow)]
pub struct RideWithOwner {
    #[sqlx(flatten)]
    pub ride: Ride,
    pub rider_first_name: String,
    pub rider_last_name: String,
    pub rider_email: String,
}

/// Ride row joined with owner and (optional) moderator attribution
#[derive(Debug, Clone, FromRow)]
pub struct RideWithModeration {
    #[sqlx(flatten)]
    pub ride: Ride,
    pub rider_first_name: String,
    pub rider_last_name: String,
    pub rider_email: String,
    pub moderator_first_name: Option<String>,
    pub moderator_last_name: Option<String>,
}

/// Validated fields for a ride insert
#[derive(Debug, Clone)]
pub struct NewRide {
    pub rider: Uuid,
    pub starting_point: String,
    pub destination: String,
    pub is_nust_start: bool,
    pub is_nust_dest: bool,
    pub stops: Vec<String>,
    pub ride_frequency: String,
    pub days_available: Vec<String>,
    pub trip_type: String,
    pub departure_time: String,
    pub return_time: Option<String>,
    pub price: String,
    pub vehicle_type: String,
    pub vehicle_details: String,
    pub passenger_capacity: Option<String>,
    pub preferences: RidePreferences,
    pub additional_info: Option<String>,
    pub user_name: String,
    pub student_id: String,
    pub phone_number: String,
    pub is_primary_whatsapp: bool,
    pub email: Option<String>,
    pub preferred_contact_method: String,
    pub share_contact_consent: bool,
}

/// Sparse patch for an owner-side ride update; `None` leaves the stored
/// value untouched
#[derive(Debug, Clone, Default)]
pub struct RideChanges {
    pub starting_point: Option<String>,
    pub destination: Option<String>,
    pub is_nust_start: Option<bool>,
    pub is_nust_dest: Option<bool>,
    pub stops: Option<Vec<String>>,
    pub ride_frequency: Option<String>,
    pub days_available: Option<Vec<String>>,
    pub trip_type: Option<String>,
    pub departure_time: Option<String>,
    pub return_time: Option<String>,
    pub price: Option<String>,
    pub vehicle_type: Option<String>,
    pub vehicle_details: Option<String>,
    pub passenger_capacity: Option<String>,
    pub preferences: Option<RidePreferences>,
    pub additional_info: Option<String>,
    pub user_name: Option<String>,
    pub student_id: Option<String>,
    pub phone_number: Option<String>,
    pub is_primary_whatsapp: Option<bool>,
    pub email: Option<String>,
    pub preferred_contact_method: Option<String>,
    pub status: Option<String>,
}

/// Effect of a moderation decision on the ride's flag and lifecycle status.
///
/// `pending` flags the ride for review; `rejected` cancels it (and the
/// cancellation is never reverted by a later decision touching only the
/// moderation fields); `approved` clears the flag and leaves the status
/// untouched.
pub fn moderation_transition(decision: &str, current_status: &str) -> (bool, String) {
    let is_flagged = decision == moderation_statuses::PENDING;
    let status = if decision == moderation_statuses::REJECTED {
        ride_statuses::CANCELLED.to_string()
    } else {
        current_status.to_string()
    };
    (is_flagged, status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moderation_transition_rejected_cancels() {
        for current in ["active", "completed", "cancelled"] {
            let (flagged, status) = moderation_transition("rejected", current);
            assert!(!flagged);
            assert_eq!(status, "cancelled");
        }
    }

    #[test]
    fn test_moderation_transition_pending_flags() {
        let (flagged, status) = moderation_transition("pending", "active");
        assert!(flagged);
        assert_eq!(status, "active");
    }

    #[test]
    fn test_moderation_transition_approved_clears_flag() {
        let (flagged, status) = moderation_transition("approved", "active");
        assert!(!flagged);
        assert_eq!(status, "active");

        // Approval after rejection does not resurrect a cancelled ride
        let (flagged, status) = moderation_transition("approved", "cancelled");
        assert!(!flagged);
        assert_eq!(status, "cancelled");
    }

    #[test]
    fn test_preferences_default_to_false() {
        let prefs: RidePreferences = serde_json::from_str("{}").unwrap();
        assert!(!prefs.car.air_conditioned);
        assert!(!prefs.bike.helmet_provided);

        let prefs: RidePreferences =
            serde_json::from_str(r#"{"car":{"airConditioned":true}}"#).unwrap();
        assert!(prefs.car.air_conditioned);
        assert!(!prefs.car.smoking_allowed);
    }
}
