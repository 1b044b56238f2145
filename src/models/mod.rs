//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod otp;
pub mod ride;
pub mod user;

pub use otp::*;
pub use ride::*;
pub use user::*;
