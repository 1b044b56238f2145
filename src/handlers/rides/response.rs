//! Ride response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Ride, RidePreferences, RideWithModeration, RideWithOwner};

/// Owning rider's public fields
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiderInfo {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Moderator attribution on admin listings
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeratorInfo {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
}

/// Ride with the owner populated in place of the raw rider id
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RideWithOwnerResponse {
    pub id: Uuid,
    pub rider: RiderInfo,
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
    pub status: String,
    pub is_flagged: bool,
    pub flag_reason: String,
    pub moderation_status: String,
    pub admin_notes: String,
    pub last_moderated_by: Option<Uuid>,
    pub last_moderated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RideWithOwnerResponse {
    fn from_parts(ride: Ride, first_name: String, last_name: String, email: String) -> Self {
        Self {
            id: ride.id,
            rider: RiderInfo {
                id: ride.rider,
                first_name,
                last_name,
                email,
            },
            starting_point: ride.starting_point,
            destination: ride.destination,
            is_nust_start: ride.is_nust_start,
            is_nust_dest: ride.is_nust_dest,
            stops: ride.stops,
            ride_frequency: ride.ride_frequency,
            days_available: ride.days_available,
            trip_type: ride.trip_type,
            departure_time: ride.departure_time,
            return_time: ride.return_time,
            price: ride.price,
            vehicle_type: ride.vehicle_type,
            vehicle_details: ride.vehicle_details,
            passenger_capacity: ride.passenger_capacity,
            preferences: ride.preferences.0,
            additional_info: ride.additional_info,
            user_name: ride.user_name,
            student_id: ride.student_id,
            phone_number: ride.phone_number,
            is_primary_whatsapp: ride.is_primary_whatsapp,
            email: ride.email,
            preferred_contact_method: ride.preferred_contact_method,
            share_contact_consent: ride.share_contact_consent,
            status: ride.status,
            is_flagged: ride.is_flagged,
            flag_reason: ride.flag_reason,
            moderation_status: ride.moderation_status,
            admin_notes: ride.admin_notes,
            last_moderated_by: ride.last_moderated_by,
            last_moderated_at: ride.last_moderated_at,
            created_at: ride.created_at,
            updated_at: ride.updated_at,
        }
    }
}

impl From<RideWithOwner> for RideWithOwnerResponse {
    fn from(row: RideWithOwner) -> Self {
        Self::from_parts(
            row.ride,
            row.rider_first_name,
            row.rider_last_name,
            row.rider_email,
        )
    }
}

/// Admin listing entry: owner-populated ride plus moderator attribution
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminRideResponse {
    #[serde(flatten)]
    pub ride: RideWithOwnerResponse,
    pub last_moderated_by_info: Option<ModeratorInfo>,
}

impl From<RideWithModeration> for AdminRideResponse {
    fn from(row: RideWithModeration) -> Self {
        let moderator = match (
            row.ride.last_moderated_by,
            row.moderator_first_name,
            row.moderator_last_name,
        ) {
            (Some(id), Some(first_name), Some(last_name)) => Some(ModeratorInfo {
                id,
                first_name,
                last_name,
            }),
            _ => None,
        };

        Self {
            ride: RideWithOwnerResponse::from_parts(
                row.ride,
                row.rider_first_name,
                row.rider_last_name,
                row.rider_email,
            ),
            last_moderated_by_info: moderator,
        }
    }
}

/// Creation response
#[derive(Debug, Serialize)]
pub struct CreateRideResponse {
    pub success: bool,
    pub ride: Ride,
}

/// Deletion confirmation
#[derive(Debug, Serialize)]
pub struct DeleteRideResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
}
