//! Ride listing handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::state::AppState;

/// Ride routes (public and owner-gated; admin routes live in `handlers::admin`)
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_rides))
        .route("/", post(handler::create_ride))
        .route("/filter", get(handler::filter_rides))
        .route("/myrides", get(handler::list_my_rides))
        .route("/{id}", get(handler::get_ride))
        .route("/{id}", put(handler::update_ride))
        .route("/{id}", delete(handler::delete_ride))
}
