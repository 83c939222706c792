//! SMTP mail transport.
//!
//! Sends a single HTML message addressed to every target through an
//! authenticated STARTTLS relay.

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;

use crate::config::Config;

#[cfg(test)]
use mockall::automock;

/// Mail transport errors
#[derive(Error, Debug)]
pub enum MailError {
    #[error("invalid address {address:?}: {source}")]
    Address {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },

    #[error("no recipients")]
    NoRecipients,

    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Outbound mail transport.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send one HTML message to all `targets` jointly.
    async fn send_html(&self, targets: &[String], subject: &str, html: &str)
        -> Result<(), MailError>;
}

/// SMTP settings taken from the application configuration.
#[derive(Clone)]
pub struct SmtpMailer {
    host: String,
    port: u16,
    user: String,
    pass: String,
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("pass", &"[REDACTED]")
            .finish()
    }
}

impl SmtpMailer {
    pub fn from_config(config: &Config) -> Self {
        Self {
            host: config.smtp_host.clone(),
            port: config.smtp_port,
            user: config.email_user.clone(),
            pass: config.email_pass().to_string(),
        }
    }

    /// Build the message without sending it.
    pub fn build_message(
        &self,
        targets: &[String],
        subject: &str,
        html: &str,
    ) -> Result<Message, MailError> {
        if targets.is_empty() {
            return Err(MailError::NoRecipients);
        }

        let mut builder = Message::builder()
            .from(parse_mailbox(&self.user)?)
            .subject(subject)
            .header(ContentType::TEXT_HTML);

        for target in targets {
            builder = builder.to(parse_mailbox(target)?);
        }

        Ok(builder.body(html.to_string())?)
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address.parse().map_err(|source| MailError::Address {
        address: address.to_string(),
        source,
    })
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_html(
        &self,
        targets: &[String],
        subject: &str,
        html: &str,
    ) -> Result<(), MailError> {
        let message = self.build_message(targets, subject, html)?;

        let creds = Credentials::new(self.user.clone(), self.pass.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)?
            .port(self.port)
            .credentials(creds)
            .build();

        transport.send(message).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mailer() -> SmtpMailer {
        let mut config = Config::with_secret("s");
        config.email_user = "alerts@example.com".to_string();
        SmtpMailer::from_config(&config)
    }

    #[test]
    fn test_single_message_for_all_targets() {
        let targets = vec!["a@example.com".to_string(), "b@example.org".to_string()];
        let message = mailer()
            .build_message(&targets, "Disk full", "<p>hi</p>")
            .unwrap();

        let recipients: Vec<String> = message
            .envelope()
            .to()
            .iter()
            .map(|a| a.to_string())
            .collect();
        assert_eq!(recipients, targets);

        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Subject: Disk full"));
        assert!(raw.contains("text/html"));
        assert!(raw.contains("From: alerts@example.com"));
    }

    #[test]
    fn test_rejects_empty_target_list() {
        let err = mailer().build_message(&[], "s", "b").unwrap_err();
        assert!(matches!(err, MailError::NoRecipients));
    }

    #[test]
    fn test_unset_sender_is_an_error() {
        let mailer = SmtpMailer::from_config(&Config::with_secret("s"));
        let err = mailer
            .build_message(&["a@example.com".to_string()], "s", "b")
            .unwrap_err();
        assert!(matches!(err, MailError::Address { .. }));
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug = format!("{:?}", mailer());
        assert!(debug.contains("[REDACTED]"));
    }
}
