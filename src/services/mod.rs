//! Business logic services

pub mod admin_service;
pub mod auth_service;
pub mod contact_service;
pub mod ride_service;

pub use admin_service::AdminService;
pub use auth_service::AuthService;
pub use contact_service::ContactService;
pub use ride_service::RideService;
