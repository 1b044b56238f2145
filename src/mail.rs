//! Outgoing mail gateway
//!
//! Email delivery goes through an HTTP mail-relay API. The `Mailer` trait is
//! the seam the services depend on; the concrete client is constructed once
//! at startup and injected through application state.

use async_trait::async_trait;
use serde::Serialize;

use crate::{
    config::MailConfig,
    error::{AppError, AppResult},
};

/// A single outgoing email
#[derive(Debug, Clone, Serialize)]
pub struct EmailMessage {
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
}

/// Mail dispatch interface
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one message; errors surface to the caller, no retries
    async fn send(&self, message: EmailMessage) -> AppResult<()>;
}

/// Mailer backed by an HTTP relay API
pub struct HttpMailer {
    client: reqwest::Client,
    config: MailConfig,
}

#[derive(Debug, Serialize)]
struct RelayRequest<'a> {
    from: &'a str,
    to: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    subject: &'a str,
    html: &'a str,
}

impl HttpMailer {
    pub fn new(config: MailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, message: EmailMessage) -> AppResult<()> {
        let request = RelayRequest {
            from: &self.config.from,
            to: &message.to,
            reply_to: message.reply_to.as_deref(),
            subject: &message.subject,
            html: &message.html,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Mail(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::Mail(format!(
                "relay returned {}",
                response.status()
            )));
        }

        tracing::debug!(to = %message.to, subject = %message.subject, "Email dispatched");
        Ok(())
    }
}

/// Email templates
pub mod templates {
    use super::EmailMessage;
    use crate::constants::OTP_TTL_MINUTES;

    /// Signup verification OTP email
    pub fn verification_email(to: &str, code: &str) -> EmailMessage {
        EmailMessage {
            to: to.to_string(),
            reply_to: None,
            subject: "Verify Your Email - RideTogether".to_string(),
            html: format!(
                "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
                 <h2>Welcome to RideTogether!</h2>\
                 <p>Thank you for signing up. To complete your registration, please use the following OTP:</p>\
                 <div style=\"background-color: #f5f5f5; padding: 15px; text-align: center;\">\
                 <h1 style=\"margin: 0; font-size: 32px;\">{code}</h1></div>\
                 <p>This OTP will expire in {OTP_TTL_MINUTES} minutes.</p>\
                 <p>If you didn't request this verification, please ignore this email.</p>\
                 </div>"
            ),
        }
    }

    /// Password reset OTP email
    pub fn password_reset_email(to: &str, code: &str) -> EmailMessage {
        EmailMessage {
            to: to.to_string(),
            reply_to: None,
            subject: "Reset Your Password - RideTogether".to_string(),
            html: format!(
                "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
                 <h2>Password Reset Request</h2>\
                 <p>We received a request to reset your RideTogether account password. Use the OTP below to proceed:</p>\
                 <div style=\"background-color: #f5f5f5; padding: 15px; text-align: center;\">\
                 <h1 style=\"margin: 0; font-size: 32px;\">{code}</h1></div>\
                 <p>This OTP will expire in {OTP_TTL_MINUTES} minutes.</p>\
                 <p>If you did not request a password reset, you can safely ignore this email. \
                 Your password will remain unchanged.</p>\
                 </div>"
            ),
        }
    }

    /// Contact-form relay email
    pub fn contact_form_email(
        recipient: &str,
        name: &str,
        email: &str,
        subject: &str,
        phone: Option<&str>,
        message: &str,
    ) -> EmailMessage {
        EmailMessage {
            to: recipient.to_string(),
            reply_to: Some(email.to_string()),
            subject: format!("Contact Form Submission: {subject}"),
            html: format!(
                "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
                 <h2>New Contact Form Submission</h2>\
                 <p><strong>Name:</strong> {name}</p>\
                 <p><strong>Email:</strong> {email}</p>\
                 <p><strong>Phone:</strong> {phone}</p>\
                 <p><strong>Subject:</strong> {subject}</p>\
                 <p><strong>Message:</strong></p>\
                 <div style=\"background-color: #f5f5f5; padding: 15px;\">{message}</div>\
                 </div>",
                phone = phone.unwrap_or("N/A"),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::templates::*;

    #[test]
    fn test_verification_email_contains_code() {
        let message = verification_email("new@x.com", "483920");
        assert_eq!(message.to, "new@x.com");
        assert_eq!(message.subject, "Verify Your Email - RideTogether");
        assert!(message.html.contains("483920"));
        assert!(message.html.contains("10 minutes"));
        assert!(message.reply_to.is_none());
    }

    #[test]
    fn test_password_reset_email_contains_code() {
        let message = password_reset_email("user@x.com", "112233");
        assert_eq!(message.subject, "Reset Your Password - RideTogether");
        assert!(message.html.contains("112233"));
    }

    #[test]
    fn test_contact_form_email_sets_reply_to() {
        let message = contact_form_email(
            "support@ridetogether.app",
            "Ada",
            "ada@nust.edu.pk",
            "Lost item",
            None,
            "Left my bag in a ride",
        );
        assert_eq!(message.to, "support@ridetogether.app");
        assert_eq!(message.reply_to.as_deref(), Some("ada@nust.edu.pk"));
        assert!(message.subject.contains("Lost item"));
        assert!(message.html.contains("N/A"));
        assert!(message.html.contains("Left my bag in a ride"));
    }
}
