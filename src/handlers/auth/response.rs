//! Authentication response DTOs

use serde::Serialize;
use uuid::Uuid;

use crate::models::User;

/// Public user fields
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub profile_picture: Option<String>,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            username: user.username,
            email: user.email,
            is_admin: user.is_admin,
            phone: user.phone,
            bio: user.bio,
            profile_picture: user.profile_picture,
        }
    }
}

/// Public user fields plus a session token
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    #[serde(flatten)]
    pub user: ProfileResponse,
    pub token: String,
}

/// Plain confirmation message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
