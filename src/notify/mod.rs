//! Status change notification subsystem.
//!
//! # Data Flow
//! ```text
//! Poller (status changed)
//!     → StatusUpdate { flight, route, sample, rendered }
//!     → Notifier::notify()
//!         → email.rs (SMTP relay, STARTTLS)
//!         → log.rs   (dry run)
//! ```
//!
//! # Design Decisions
//! - Notification failures never stop the poll loop
//! - Message text is built from the rendered status so the e-mail matches
//!   exactly what was compared

pub mod email;
pub mod log;

use async_trait::async_trait;
use thiserror::Error;

use crate::monitor::{FlightIdent, Route, StatusSample};

pub use email::EmailNotifier;
pub use log::LogNotifier;

/// Errors that can occur while delivering a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Sender or recipient could not be parsed.
    #[error("Invalid address: {0}")]
    Address(String),

    /// Message could not be assembled.
    #[error("Failed to build message: {0}")]
    Message(String),

    /// Relay connection, TLS or authentication failed.
    #[error("Mail transport error: {0}")]
    Transport(String),
}

/// A detected status change, ready to be delivered.
#[derive(Debug, Clone)]
pub struct StatusUpdate {
    pub flight: FlightIdent,
    pub route: Route,
    pub sample: StatusSample,
    /// Rendered status as compared by the poller.
    pub rendered: String,
}

impl StatusUpdate {
    /// Plain-text message body.
    pub fn body(&self) -> String {
        let mut body = format!("Flight Status Update:\n\n{}", self.rendered);
        if let Some(route) = self.route.describe() {
            body.push_str("\nRoute: ");
            body.push_str(&route);
        }
        body
    }
}

/// Sink for status change notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one update.
    async fn notify(&self, update: &StatusUpdate) -> Result<(), NotifyError>;
}

#[async_trait]
impl<T: Notifier + ?Sized> Notifier for Box<T> {
    async fn notify(&self, update: &StatusUpdate) -> Result<(), NotifyError> {
        (**self).notify(update).await
    }
}
