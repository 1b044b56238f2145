//! Authentication handler implementations

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    services::AuthService,
    state::AppState,
};

use super::{
    request::{
        ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest,
        SendOtpRequest, UpdateProfileRequest, VerifyResetOtpRequest,
    },
    response::{AuthResponse, MessageResponse, ProfileResponse},
};

/// Issue a signup verification OTP
pub async fn send_otp(
    State(state): State<AppState>,
    Json(payload): Json<SendOtpRequest>,
) -> AppResult<Json<MessageResponse>> {
    payload.validate()?;

    AuthService::request_otp(state.db(), state.mailer(), &payload.email).await?;

    Ok(Json(MessageResponse {
        message: "OTP sent successfully".to_string(),
    }))
}

/// Verify a signup OTP and register the account
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    payload.validate()?;

    let (user, token) =
        AuthService::verify_and_register(state.db(), &state.config().jwt, payload).await?;

    let response = AuthResponse {
        user: ProfileResponse::from(user),
        token,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Login with username and password
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    payload.validate()?;

    let (user, token) = AuthService::login(
        state.db(),
        &state.config().jwt,
        &payload.username,
        &payload.password,
    )
    .await?;

    Ok(Json(AuthResponse {
        user: ProfileResponse::from(user),
        token,
    }))
}

/// Issue a password-reset OTP
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    payload.validate()?;

    AuthService::request_password_reset(state.db(), state.mailer(), &payload.email).await?;

    Ok(Json(MessageResponse {
        message: "OTP sent to email for password reset".to_string(),
    }))
}

/// Verify a password-reset OTP
pub async fn verify_reset_otp(
    State(state): State<AppState>,
    Json(payload): Json<VerifyResetOtpRequest>,
) -> AppResult<Json<MessageResponse>> {
    payload.validate()?;

    AuthService::verify_reset_otp(state.db(), &payload.email, &payload.otp).await?;

    Ok(Json(MessageResponse {
        message: "OTP verified. You can now reset your password.".to_string(),
    }))
}

/// Set a new password using a verified reset OTP
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    payload.validate()?;

    AuthService::reset_password(state.db(), &payload.email, &payload.otp, &payload.new_password)
        .await?;

    Ok(Json(MessageResponse {
        message: "Password reset successful. Please login.".to_string(),
    }))
}

/// Get the authenticated user's profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<ProfileResponse>> {
    let user = AuthService::get_profile(state.db(), &auth_user.id).await?;

    Ok(Json(ProfileResponse::from(user)))
}

/// Sparse-patch the authenticated user's profile; returns a fresh token
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<AuthResponse>> {
    payload.validate()?;

    let user = AuthService::update_profile(state.db(), &auth_user.id, payload).await?;
    let token = AuthService::generate_token(&user.id, &state.config().jwt)?;

    Ok(Json(AuthResponse {
        user: ProfileResponse::from(user),
        token,
    }))
}
