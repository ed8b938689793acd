//! Notifier implementations for hosts without a toast surface.

use bulk_user_settings_sdk::{Notification, Notifier, Severity};
use parking_lot::Mutex;
use tracing::{error, info, warn};

/// Writes notifications to the log, at a level matching their severity.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let Notification {
            title,
            body,
            severity,
            ..
        } = notification;
        match severity {
            Severity::Success | Severity::Info => info!(%title, "{body}"),
            Severity::Warning => warn!(%title, "{body}"),
            Severity::Error => error!(%title, "{body}"),
        }
    }
}

/// Keeps every notification in memory, in order.
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    received: Mutex<Vec<Notification>>,
}

impl CollectingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.received.lock().clone()
    }

    /// Remove and return everything received so far.
    #[must_use]
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.received.lock())
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, notification: Notification) {
        self.received.lock().push(notification);
    }
}
