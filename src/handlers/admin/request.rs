//! Moderation request DTOs

use serde::Deserialize;

/// Flag request; the reason is mandatory and checked by the service
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlagRideRequest {
    pub flag_reason: Option<String>,
}

/// Moderation decision request
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModerateRideRequest {
    pub moderation_status: Option<String>,
    pub admin_notes: Option<String>,
}
