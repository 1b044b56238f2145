//! Contact form handler

use axum::{extract::State, Json};
use serde::Deserialize;
use validator::Validate;

use crate::{
    constants::MAX_CONTACT_MESSAGE_LENGTH,
    error::AppResult,
    handlers::auth::response::MessageResponse,
    services::ContactService,
    state::AppState,
};

/// Contact form submission
#[derive(Debug, Deserialize, Validate)]
pub struct ContactFormRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 200))]
    pub subject: String,

    pub phone: Option<String>,

    #[validate(length(min = 1, max = MAX_CONTACT_MESSAGE_LENGTH))]
    pub message: String,
}

/// Relay a contact-form submission to the support inbox
pub async fn submit_contact_form(
    State(state): State<AppState>,
    Json(payload): Json<ContactFormRequest>,
) -> AppResult<Json<MessageResponse>> {
    payload.validate()?;

    ContactService::relay(
        state.mailer(),
        &state.config().mail.contact_recipient,
        &payload.name,
        &payload.email,
        &payload.subject,
        payload.phone.as_deref(),
        &payload.message,
    )
    .await?;

    Ok(Json(MessageResponse {
        message: "Your message has been sent successfully.".to_string(),
    }))
}
