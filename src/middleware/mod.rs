//! HTTP middleware

pub mod auth;
pub mod logging;

pub use auth::{require_admin, AuthenticatedUser};
pub use logging::logging_middleware;
