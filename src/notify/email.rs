//! E-mail delivery over an authenticated SMTP relay.
//!
//! # Responsibilities
//! - Build a plain-text message with the configured subject
//! - Deliver it through the relay using STARTTLS and login credentials
//!
//! # Design Decisions
//! - Addresses are parsed once at construction so bad config fails at startup
//! - The transport is built once; lettre opens a connection per send

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::EmailConfig;
use crate::notify::{Notifier, NotifyError, StatusUpdate};

/// Sends status updates by e-mail.
pub struct EmailNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    recipient: Mailbox,
    subject: String,
}

impl EmailNotifier {
    /// Create a notifier from validated configuration.
    pub fn new(config: &EmailConfig) -> Result<Self, NotifyError> {
        let sender = parse_mailbox(&config.sender)?;
        let recipient = parse_mailbox(&config.recipient)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| NotifyError::Transport(e.to_string()))?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.login().to_string(),
                config.password.clone(),
            ))
            .build();

        tracing::info!(
            smtp_host = %config.smtp_host,
            smtp_port = config.smtp_port,
            recipient = %recipient,
            "E-mail notifier initialized"
        );

        Ok(Self {
            transport,
            sender,
            recipient,
            subject: config.subject.clone(),
        })
    }

    /// Assemble the message for an update.
    pub fn build_message(&self, update: &StatusUpdate) -> Result<Message, NotifyError> {
        Message::builder()
            .from(self.sender.clone())
            .to(self.recipient.clone())
            .subject(self.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(update.body())
            .map_err(|e| NotifyError::Message(e.to_string()))
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn notify(&self, update: &StatusUpdate) -> Result<(), NotifyError> {
        let message = self.build_message(update)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        tracing::info!(
            flight = %update.flight,
            recipient = %self.recipient,
            "Status update e-mailed"
        );
        Ok(())
    }
}

fn parse_mailbox(addr: &str) -> Result<Mailbox, NotifyError> {
    addr.parse::<Mailbox>()
        .map_err(|e| NotifyError::Address(format!("'{}': {}", addr, e)))
}
