//! OTP repository
//!
//! Every state transition is a single atomic row update predicated on the
//! current state and an unexpired validity window, so a code can never be
//! consumed twice even under concurrent requests.

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};

use crate::{
    constants::otp_states,
    error::AppResult,
    models::OtpRecord,
};

/// Repository for OTP database operations
pub struct OtpRepository;

impl OtpRepository {
    /// Persist a freshly issued code
    pub async fn create(
        pool: &PgPool,
        email: &str,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<OtpRecord> {
        let record = sqlx::query_as::<_, OtpRecord>(
            r#"
            INSERT INTO otps (email, code, state, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(code)
        .bind(otp_states::ISSUED)
        .bind(expires_at)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Atomically spend an issued, unexpired code (registration flow)
    ///
    /// Returns `None` when no matching record exists, which covers wrong
    /// code, already-spent code, and expired code alike.
    pub async fn consume_issued(
        conn: &mut PgConnection,
        email: &str,
        code: &str,
    ) -> AppResult<Option<OtpRecord>> {
        let record = sqlx::query_as::<_, OtpRecord>(
            r#"
            UPDATE otps
            SET state = $3
            WHERE email = $1 AND code = $2 AND state = $4 AND expires_at > NOW()
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(code)
        .bind(otp_states::CONSUMED)
        .bind(otp_states::ISSUED)
        .fetch_optional(conn)
        .await?;

        Ok(record)
    }

    /// Atomically move an issued, unexpired code to `verified`
    /// (password-reset verification step)
    pub async fn mark_verified(
        pool: &PgPool,
        email: &str,
        code: &str,
    ) -> AppResult<Option<OtpRecord>> {
        let record = sqlx::query_as::<_, OtpRecord>(
            r#"
            UPDATE otps
            SET state = $3
            WHERE email = $1 AND code = $2 AND state = $4 AND expires_at > NOW()
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(code)
        .bind(otp_states::VERIFIED)
        .bind(otp_states::ISSUED)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Atomically spend a verified, unexpired code (final reset step)
    pub async fn consume_verified(
        conn: &mut PgConnection,
        email: &str,
        code: &str,
    ) -> AppResult<Option<OtpRecord>> {
        let record = sqlx::query_as::<_, OtpRecord>(
            r#"
            UPDATE otps
            SET state = $3
            WHERE email = $1 AND code = $2 AND state = $4 AND expires_at > NOW()
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(code)
        .bind(otp_states::CONSUMED)
        .bind(otp_states::VERIFIED)
        .fetch_optional(conn)
        .await?;

        Ok(record)
    }

    /// Drop expired rows. Hygiene only; every lookup re-checks expiry.
    pub async fn delete_expired(pool: &PgPool) -> AppResult<u64> {
        let result = sqlx::query(r#"DELETE FROM otps WHERE expires_at <= NOW()"#)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}
