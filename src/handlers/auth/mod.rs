//! Authentication handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;

/// Authentication routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/send-otp", post(handler::send_otp))
        .route("/verify-otp", post(handler::verify_otp))
        .route("/login", post(handler::login))
        .route("/forgot-password", post(handler::forgot_password))
        .route("/verify-reset-otp", post(handler::verify_reset_otp))
        .route("/reset-password", post(handler::reset_password))
        .route("/profile", get(handler::get_profile))
        .route("/profile", put(handler::update_profile))
}
