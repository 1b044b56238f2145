//! Utility functions

pub mod crypto;
pub mod time;
pub mod validation;

pub use crypto::generate_otp;
pub use time::{now_utc, otp_expiry};
