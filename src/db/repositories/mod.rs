//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod otp_repo;
pub mod ride_repo;
pub mod user_repo;

pub use otp_repo::OtpRepository;
pub use ride_repo::{RideFilter, RideRepository};
pub use user_repo::UserRepository;
