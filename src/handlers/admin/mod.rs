//! Ride moderation handlers (admin only)

mod handler;
pub mod request;

pub use handler::*;
pub use request::*;

use axum::{
    routing::{delete, get, put},
    Router,
};

use crate::state::AppState;

/// Moderation routes, merged under `/rides` alongside the public routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/all", get(handler::list_all_rides))
        .route("/{id}/flag", put(handler::flag_ride))
        .route("/{id}/moderate", put(handler::moderate_ride))
        .route("/admin/{id}", delete(handler::admin_delete_ride))
}
