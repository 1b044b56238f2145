//! Authentication service
//!
//! Orchestrates the OTP-gated identity lifecycle: signup verification,
//! registration, login, password reset, and profile maintenance.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    config::JwtConfig,
    db::repositories::{OtpRepository, UserRepository},
    error::{AppError, AppResult},
    handlers::auth::request::{RegisterRequest, UpdateProfileRequest},
    mail::{templates, Mailer},
    models::User,
    utils::{generate_otp, otp_expiry, validation},
};

/// Session token claims: only the subject identity and the validity window
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub iat: i64,
    pub exp: i64,
}

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Issue a signup OTP for an email that is not yet registered
    ///
    /// The OTP row is persisted before dispatch; if the mail relay fails the
    /// row stays behind as a dead record bounded by its TTL.
    pub async fn request_otp(pool: &PgPool, mailer: &dyn Mailer, email: &str) -> AppResult<()> {
        validation::validate_email(email).map_err(|e| AppError::Validation(e.to_string()))?;

        if UserRepository::find_by_email(pool, email).await?.is_some() {
            return Err(AppError::Conflict(
                "User already exists with this email".to_string(),
            ));
        }

        let code = generate_otp();
        OtpRepository::create(pool, email, &code, otp_expiry()).await?;

        mailer.send(templates::verification_email(email, &code)).await?;

        tracing::info!(email = %email, "Signup OTP issued");
        Ok(())
    }

    /// Verify a signup OTP and create the account
    ///
    /// OTP consumption and account creation run in one transaction, so a
    /// crash mid-flow cannot strand a consumed code without an account.
    pub async fn verify_and_register(
        pool: &PgPool,
        jwt: &JwtConfig,
        payload: RegisterRequest,
    ) -> AppResult<(User, String)> {
        validation::validate_username(&payload.username)
            .map_err(|e| AppError::Validation(e.to_string()))?;
        validation::validate_password(&payload.password)
            .map_err(|e| AppError::Validation(e.to_string()))?;
        validation::validate_otp_code(&payload.otp).map_err(|_| AppError::InvalidOtp)?;

        let mut tx = pool.begin().await?;

        OtpRepository::consume_issued(&mut *tx, &payload.email, &payload.otp)
            .await?
            .ok_or(AppError::InvalidOtp)?;

        if UserRepository::exists_with_email_or_username(&mut *tx, &payload.email, &payload.username)
            .await?
        {
            return Err(AppError::Conflict(
                "User already exists with this email or username".to_string(),
            ));
        }

        let password_hash = Self::hash_password(&payload.password)?;

        let user = UserRepository::create(
            &mut *tx,
            &payload.username,
            &payload.email,
            &password_hash,
            &payload.first_name,
            &payload.last_name,
        )
        .await?;

        tx.commit().await?;

        let token = Self::generate_token(&user.id, jwt)?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok((user, token))
    }

    /// Login with username and password
    pub async fn login(
        pool: &PgPool,
        jwt: &JwtConfig,
        username: &str,
        password: &str,
    ) -> AppResult<(User, String)> {
        // Absent user and bad password fail identically
        let user = UserRepository::find_by_username(pool, username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !Self::verify_password(password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        let token = Self::generate_token(&user.id, jwt)?;

        Ok((user, token))
    }

    /// Issue a password-reset OTP for an existing account
    pub async fn request_password_reset(
        pool: &PgPool,
        mailer: &dyn Mailer,
        email: &str,
    ) -> AppResult<()> {
        if UserRepository::find_by_email(pool, email).await?.is_none() {
            return Err(AppError::NotFound(
                "No user found with this email".to_string(),
            ));
        }

        let code = generate_otp();
        OtpRepository::create(pool, email, &code, otp_expiry()).await?;

        mailer
            .send(templates::password_reset_email(email, &code))
            .await?;

        tracing::info!(email = %email, "Password reset OTP issued");
        Ok(())
    }

    /// Verify a reset OTP, moving it to the `verified` state
    pub async fn verify_reset_otp(pool: &PgPool, email: &str, otp: &str) -> AppResult<()> {
        validation::validate_otp_code(otp).map_err(|_| AppError::InvalidOtp)?;

        OtpRepository::mark_verified(pool, email, otp)
            .await?
            .ok_or(AppError::InvalidOtp)?;

        Ok(())
    }

    /// Set a new password using a previously verified reset OTP
    ///
    /// The record is spent in the same transaction as the password write, so
    /// the code cannot be replayed for a second reset.
    pub async fn reset_password(
        pool: &PgPool,
        email: &str,
        otp: &str,
        new_password: &str,
    ) -> AppResult<()> {
        validation::validate_otp_code(otp).map_err(|_| AppError::InvalidOtp)?;
        validation::validate_password(new_password)
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let mut tx = pool.begin().await?;

        OtpRepository::consume_verified(&mut *tx, email, otp)
            .await?
            .ok_or(AppError::InvalidOtp)?;

        let password_hash = Self::hash_password(new_password)?;

        UserRepository::set_password_by_email(&mut *tx, email, &password_hash)
            .await?
            .ok_or_else(|| AppError::NotFound("No user found with this email".to_string()))?;

        tx.commit().await?;

        tracing::info!(email = %email, "Password reset completed");
        Ok(())
    }

    /// Get a user's profile
    pub async fn get_profile(pool: &PgPool, user_id: &Uuid) -> AppResult<User> {
        UserRepository::find_by_id(pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Sparse-patch profile fields; a password in the patch is re-hashed
    pub async fn update_profile(
        pool: &PgPool,
        user_id: &Uuid,
        payload: UpdateProfileRequest,
    ) -> AppResult<User> {
        if UserRepository::find_by_id(pool, user_id).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let password_hash = payload
            .password
            .as_deref()
            .map(Self::hash_password)
            .transpose()?;

        UserRepository::update_profile(
            pool,
            user_id,
            payload.first_name.as_deref(),
            payload.last_name.as_deref(),
            payload.phone.as_deref(),
            payload.bio.as_deref(),
            payload.profile_picture.as_deref(),
            password_hash.as_deref(),
        )
        .await
    }

    /// Verify a session token and extract its claims
    pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    /// Generate a session token for the given user
    pub fn generate_token(user_id: &Uuid, jwt: &JwtConfig) -> AppResult<String> {
        let now = Utc::now();
        let expires_at = now + Duration::days(jwt.expiry_days);

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(jwt.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {}", e)))?;

        Ok(token)
    }

    /// Hash password using Argon2
    fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?
            .to_string();

        Ok(hash)
    }

    /// Verify password against hash
    fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt_config(expiry_days: i64) -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            expiry_days,
        }
    }

    #[test]
    fn test_token_round_trip() {
        let jwt = jwt_config(30);
        let user_id = Uuid::new_v4();

        let token = AuthService::generate_token(&user_id, &jwt).unwrap();
        let claims = AuthService::verify_token(&token, &jwt.secret).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        // 30-day validity window
        assert_eq!(claims.exp - claims.iat, 30 * 24 * 60 * 60);
    }

    #[test]
    fn test_token_rejects_wrong_secret() {
        let jwt = jwt_config(30);
        let token = AuthService::generate_token(&Uuid::new_v4(), &jwt).unwrap();

        let result = AuthService::verify_token(&token, "other-secret");
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let jwt = jwt_config(30);
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            iat: (now - Duration::days(2)).timestamp(),
            exp: (now - Duration::days(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(jwt.secret.as_bytes()),
        )
        .unwrap();

        let result = AuthService::verify_token(&token, &jwt.secret);
        assert!(matches!(result, Err(AppError::TokenExpired)));
    }

    #[test]
    fn test_password_hash_round_trip() {
        let hash = AuthService::hash_password("hunter2hunter2").unwrap();
        assert_ne!(hash, "hunter2hunter2");
        assert!(AuthService::verify_password("hunter2hunter2", &hash).unwrap());
        assert!(!AuthService::verify_password("wrong-password", &hash).unwrap());
    }
}
