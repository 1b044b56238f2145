//! Ride request DTOs

use serde::Deserialize;

use crate::{
    db::repositories::RideFilter,
    models::{RideChanges, RidePreferences},
};

/// Ride creation payload
///
/// Required fields arrive as options so the cross-field validation in the
/// service can report the first failing rule instead of a decode error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateRideRequest {
    pub starting_point: Option<String>,
    pub destination: Option<String>,
    pub is_nust_start: bool,
    pub is_nust_dest: bool,
    pub stops: Vec<String>,
    pub ride_frequency: Option<String>,
    pub days_available: Vec<String>,
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
    pub is_primary_whatsapp: bool,
    pub email: Option<String>,
    pub preferred_contact_method: Option<String>,
    pub share_contact_consent: bool,
}

/// Ride sparse-patch payload; omitted fields retain prior values
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateRideRequest {
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

impl UpdateRideRequest {
    /// Convert into the repository patch shape
    pub fn into_changes(self) -> RideChanges {
        RideChanges {
            starting_point: self.starting_point,
            destination: self.destination,
            is_nust_start: self.is_nust_start,
            is_nust_dest: self.is_nust_dest,
            stops: self.stops,
            ride_frequency: self.ride_frequency,
            days_available: self.days_available,
            trip_type: self.trip_type,
            departure_time: self.departure_time,
            return_time: self.return_time,
            price: self.price,
            vehicle_type: self.vehicle_type,
            vehicle_details: self.vehicle_details,
            passenger_capacity: self.passenger_capacity,
            preferences: self.preferences,
            additional_info: self.additional_info,
            user_name: self.user_name,
            student_id: self.student_id,
            phone_number: self.phone_number,
            is_primary_whatsapp: self.is_primary_whatsapp,
            email: self.email,
            preferred_contact_method: self.preferred_contact_method,
            status: self.status,
        }
    }
}

/// Ride search query parameters
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterRidesQuery {
    pub starting_point: Option<String>,
    pub destination: Option<String>,
    pub is_nust_start: Option<bool>,
    pub is_nust_dest: Option<bool>,
    /// Comma-separated day names
    pub days_available: Option<String>,
    pub vehicle_type: Option<String>,
}

impl FilterRidesQuery {
    /// Convert into the repository filter shape
    pub fn into_filter(self) -> RideFilter {
        let days_available = self.days_available.map(|days| {
            days.split(',')
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        });

        RideFilter {
            starting_point: self.starting_point.filter(|s| !s.trim().is_empty()),
            destination: self.destination.filter(|s| !s.trim().is_empty()),
            is_nust_start: self.is_nust_start,
            is_nust_dest: self.is_nust_dest,
            days_available: days_available.filter(|d| !d.is_empty()),
            vehicle_type: self.vehicle_type.filter(|v| !v.trim().is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_days_parsing() {
        let query = FilterRidesQuery {
            days_available: Some("monday, tuesday,,friday ".to_string()),
            ..Default::default()
        };
        let filter = query.into_filter();
        assert_eq!(
            filter.days_available.unwrap(),
            vec!["monday", "tuesday", "friday"]
        );
    }

    #[test]
    fn test_filter_drops_blank_terms() {
        let query = FilterRidesQuery {
            starting_point: Some("  ".to_string()),
            destination: Some("NUST".to_string()),
            days_available: Some(" , ".to_string()),
            ..Default::default()
        };
        let filter = query.into_filter();
        assert!(filter.starting_point.is_none());
        assert_eq!(filter.destination.as_deref(), Some("NUST"));
        assert!(filter.days_available.is_none());
    }
}
