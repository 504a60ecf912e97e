//! Alert dialog handling.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::error::{Error, Result};
use crate::remote::RemoteSession;
use crate::timing::Deadline;

use super::Pilot;

// ============================================================================
// Alert
// ============================================================================

/// A handle to the session's active alert dialog.
#[derive(Clone)]
pub struct Alert {
    /// The dialog's message text, captured when the alert was found.
    text: String,
    /// The owning session.
    remote: Arc<dyn RemoteSession>,
}

impl fmt::Debug for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Alert")
            .field("text", &self.text)
            .finish_non_exhaustive()
    }
}

impl Alert {
    /// Returns the dialog's message text.
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Accepts the dialog.
    pub async fn accept(&self) -> Result<()> {
        debug!("Accepting alert");
        self.remote.accept_alert().await
    }

    /// Dismisses the dialog.
    pub async fn dismiss(&self) -> Result<()> {
        debug!("Dismissing alert");
        self.remote.dismiss_alert().await
    }
}

// ============================================================================
// Pilot - Alerts
// ============================================================================

impl Pilot {
    /// Waits for an active alert with the configured timeout.
    pub async fn alert(&self) -> Result<Alert> {
        self.alert_timeout(self.config.find_timeout).await
    }

    /// Waits for an active alert with an explicit budget.
    ///
    /// "No alert present" responses from the remote are swallowed and
    /// retried until the deadline.
    ///
    /// # Errors
    ///
    /// [`crate::Error::NoAlert`] when no dialog appears in time.
    pub async fn alert_timeout(&self, timeout: Duration) -> Result<Alert> {
        debug!(pilot = %self.uuid, timeout_ms = timeout.as_millis() as u64, "Waiting for alert");

        let deadline = Deadline::after(self.clock.now(), timeout);
        loop {
            if let Ok(text) = self.remote.alert_text().await {
                return Ok(Alert {
                    text,
                    remote: Arc::clone(&self.remote),
                });
            }
            if deadline.passed(self.clock.now()) {
                return Err(Error::no_alert(timeout.as_millis() as u64));
            }
            self.clock.sleep(self.config.poll_interval).await;
        }
    }
}
