//! Contact form relay
//!
//! Fire-and-forget relay of contact-form submissions to the support inbox.
//! Nothing is persisted; a relay failure surfaces to the caller.

use crate::{
    error::{AppError, AppResult},
    mail::{templates, Mailer},
};

/// Contact relay service
pub struct ContactService;

impl ContactService {
    /// Relay a contact-form submission to the support address
    pub async fn relay(
        mailer: &dyn Mailer,
        recipient: &str,
        name: &str,
        email: &str,
        subject: &str,
        phone: Option<&str>,
        message: &str,
    ) -> AppResult<()> {
        if name.trim().is_empty()
            || email.trim().is_empty()
            || subject.trim().is_empty()
            || message.trim().is_empty()
        {
            return Err(AppError::Validation(
                "Please fill in all required fields".to_string(),
            ));
        }

        mailer
            .send(templates::contact_form_email(
                recipient, name, email, subject, phone, message,
            ))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::MockMailer;

    #[tokio::test]
    async fn test_relay_sends_to_support_inbox() {
        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .withf(|message| {
                message.to == "support@ridetogether.app"
                    && message.reply_to.as_deref() == Some("ada@nust.edu.pk")
                    && message.html.contains("Left my bag")
            })
            .times(1)
            .returning(|_| Ok(()));

        ContactService::relay(
            &mailer,
            "support@ridetogether.app",
            "Ada",
            "ada@nust.edu.pk",
            "Lost item",
            Some("03001234567"),
            "Left my bag in a ride",
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_relay_rejects_missing_fields() {
        let mailer = MockMailer::new();

        let result = ContactService::relay(
            &mailer,
            "support@ridetogether.app",
            "Ada",
            "ada@nust.edu.pk",
            "",
            None,
            "message",
        )
        .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_relay_surfaces_dispatch_failure() {
        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .returning(|_| Err(AppError::Mail("relay unreachable".to_string())));

        let result = ContactService::relay(
            &mailer,
            "support@ridetogether.app",
            "Ada",
            "ada@nust.edu.pk",
            "Subject",
            None,
            "message",
        )
        .await;

        assert!(matches!(result, Err(AppError::Mail(_))));
    }
}
