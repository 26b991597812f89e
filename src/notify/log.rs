//! Notifier that only logs, used for dry runs and when e-mail is disabled.

use async_trait::async_trait;

use crate::notify::{Notifier, NotifyError, StatusUpdate};

#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, update: &StatusUpdate) -> Result<(), NotifyError> {
        tracing::info!(
            flight = %update.flight,
            status = ?update.sample.status(),
            body = %update.body(),
            "Status changed (not sent)"
        );
        Ok(())
    }
}
