//! OTP record model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::constants::otp_states;

/// One-time passcode record
///
/// The `state` column carries the explicit lifecycle:
/// `issued` -> `consumed` for registration, and
/// `issued` -> `verified` -> `consumed` for password reset.
/// Expiry is checked on every lookup; expired rows are dead regardless
/// of state.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpRecord {
    pub id: Uuid,
    pub email: String,
    pub code: String,
    pub state: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl OtpRecord {
    /// Whether the record's validity window has passed
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }

    /// Whether the record is still waiting for its first use
    pub fn is_issued(&self) -> bool {
        self.state == otp_states::ISSUED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(state: &str, expires_in: Duration) -> OtpRecord {
        OtpRecord {
            id: Uuid::new_v4(),
            email: "new@x.com".to_string(),
            code: "123456".to_string(),
            state: state.to_string(),
            expires_at: Utc::now() + expires_in,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_expiry_and_state_checks() {
        let fresh = record(otp_states::ISSUED, Duration::minutes(10));
        assert!(!fresh.is_expired());
        assert!(fresh.is_issued());

        let stale = record(otp_states::VERIFIED, Duration::minutes(-1));
        assert!(stale.is_expired());
        assert!(!stale.is_issued());
    }
}
