//! Authentication middleware

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::debug;
use uuid::Uuid;

use crate::{
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    services::AuthService,
    state::AppState,
};

/// Authenticated user resolved from a bearer token
///
/// Extraction verifies the token signature and expiry, then resolves the
/// subject against the user store; a token whose subject no longer exists
/// is rejected. Ownership checks downstream therefore always run against a
/// live account.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub username: String,
    pub is_admin: bool,
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            debug!("Auth failed: Authorization header is not a bearer token");
            AppError::Unauthorized
        })?;

        let claims = AuthService::verify_token(token, &state.config().jwt.secret)?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|e| {
            debug!(sub = %claims.sub, error = ?e, "Auth failed: Invalid user ID in token");
            AppError::InvalidToken
        })?;

        let user = UserRepository::find_by_id(state.db(), &user_id)
            .await?
            .ok_or_else(|| {
                debug!(user_id = %user_id, "Auth failed: token subject no longer exists");
                AppError::Unauthorized
            })?;

        Ok(AuthenticatedUser {
            id: user.id,
            username: user.username,
            is_admin: user.is_admin,
        })
    }
}

/// Admin role gate, applied after authentication
pub fn require_admin(user: &AuthenticatedUser) -> AppResult<()> {
    if user.is_admin {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Access denied. Admin privileges required".to_string(),
        ))
    }
}
