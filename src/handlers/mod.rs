//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod admin;
pub mod auth;
pub mod contact;
pub mod health;
pub mod rides;

use axum::{routing::post, Router};

use crate::state::AppState;

/// Create all API routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .nest("/auth", auth::routes())
        .nest("/rides", rides::routes().merge(admin::routes()))
        .route("/contact", post(contact::submit_contact_form))
}
