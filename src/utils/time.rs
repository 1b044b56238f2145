//! Time utilities

use chrono::{DateTime, Duration, Utc};

use crate::constants::OTP_TTL_MINUTES;

/// Get current UTC time
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Expiry instant for an OTP issued now
pub fn otp_expiry() -> DateTime<Utc> {
    now_utc() + Duration::minutes(OTP_TTL_MINUTES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_expiry_window() {
        let expiry = otp_expiry();
        let delta = expiry - now_utc();
        assert!(delta <= Duration::minutes(OTP_TTL_MINUTES));
        assert!(delta > Duration::minutes(OTP_TTL_MINUTES - 1));
    }
}
