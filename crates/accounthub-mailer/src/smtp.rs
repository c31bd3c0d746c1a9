//! SMTP mailer for password reset links.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::{Mailbox, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

use accounthub_core::config::EmailConfig;
use accounthub_core::error::{AppError, ErrorKind};
use accounthub_core::result::AppResult;
use accounthub_core::traits::EmailSender;

/// Subject line of reset emails.
const RESET_SUBJECT: &str = "Reset your password";

/// Sends reset emails through an SMTP relay.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    reset_url: String,
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("from", &self.from)
            .field("reset_url", &self.reset_url)
            .finish_non_exhaustive()
    }
}

impl SmtpMailer {
    /// Builds the SMTP transport from configuration. No connection is made
    /// until the first message is sent.
    pub fn new(config: &EmailConfig) -> AppResult<Self> {
        let builder = if config.use_starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
        }
        .map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Failed to create SMTP transport", e)
        })?;

        let mut builder = builder
            .port(config.smtp_port)
            .timeout(Some(Duration::from_secs(config.timeout_seconds)));
        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        let from = format!("{} <{}>", config.from_name, config.from_email)
            .parse::<Mailbox>()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Invalid sender address", e)
            })?;

        Ok(Self {
            transport: builder.build(),
            from,
            reset_url: config.reset_url.clone(),
        })
    }

    /// The link a recipient follows to redeem `code`.
    pub fn reset_link(&self, code: &str) -> String {
        reset_link(&self.reset_url, code)
    }

    fn build_message(&self, to: &str, code: &str) -> AppResult<Message> {
        let to = to
            .parse::<Mailbox>()
            .map_err(|e| AppError::validation(format!("Invalid recipient address: {e}")))?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(RESET_SUBJECT)
            .header(header::ContentType::TEXT_PLAIN)
            .body(reset_body(&self.reset_link(code)))
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to build email", e))
    }
}

fn reset_link(base: &str, code: &str) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}c={code}")
}

fn reset_body(link: &str) -> String {
    format!(
        "Someone asked to reset the password for your account.\n\n\
         Follow this link to choose a new password:\n{link}\n\n\
         The link works once. If you did not ask for this, ignore this email."
    )
}

#[async_trait]
impl EmailSender for SmtpMailer {
    async fn send_reset_email(&self, to: &str, code: &str) -> AppResult<()> {
        let message = self.build_message(to, code)?;
        debug!(to = %to, "Sending reset email");

        self.transport.send(message).await.map_err(|e| {
            AppError::with_source(ErrorKind::DeliveryFailed, "SMTP delivery failed", e)
        })?;

        info!(to = %to, "Reset email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_link() {
        assert_eq!(
            reset_link("https://app.example.com/password/reset", "abc"),
            "https://app.example.com/password/reset?c=abc"
        );
        assert_eq!(
            reset_link("https://app.example.com/reset?lang=en", "abc"),
            "https://app.example.com/reset?lang=en&c=abc"
        );
    }

    #[test]
    fn test_body_contains_link() {
        let body = reset_body("https://x/reset?c=abc");
        assert!(body.contains("https://x/reset?c=abc"));
    }

    #[tokio::test]
    async fn test_builds_message_without_connecting() {
        let mailer = SmtpMailer::new(&EmailConfig::default()).unwrap();
        let message = mailer.build_message("a@x.com", "abc").unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Subject: Reset your password"));
        assert!(raw.contains("To: a@x.com"));
    }

    #[tokio::test]
    async fn test_rejects_bad_recipient() {
        let mailer = SmtpMailer::new(&EmailConfig::default()).unwrap();
        assert!(mailer.build_message("not an address", "abc").is_err());
    }
}
