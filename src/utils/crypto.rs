//! Cryptographic utilities

use rand::Rng;

use crate::constants::{OTP_CODE_LENGTH, OTP_MAX_VALUE, OTP_MIN_VALUE};

/// Generate a cryptographically random 6-digit OTP code
pub fn generate_otp() -> String {
    let mut rng = rand::rng();
    rng.random_range(OTP_MIN_VALUE..=OTP_MAX_VALUE).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_otp_shape() {
        for _ in 0..100 {
            let otp = generate_otp();
            assert_eq!(otp.len(), OTP_CODE_LENGTH);
            assert!(otp.chars().all(|c| c.is_ascii_digit()));

            let value: u32 = otp.parse().unwrap();
            assert!((OTP_MIN_VALUE..=OTP_MAX_VALUE).contains(&value));
        }
    }
}
