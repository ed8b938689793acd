//! Capabilities the settings core consumes.
//!
//! The concrete transport (paged OData queries, record update calls) lives
//! behind these traits and is injected by the host application.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::SettingsError;
use crate::models::{Notification, SettingsRecord, UpdatePayload};

/// Remote store holding one settings record per user of a single tenant.
#[async_trait]
pub trait UserSettingsStoreClient: Send + Sync {
    /// Load one user's settings.
    /// Returns `Ok(None)` when the user has no settings record.
    ///
    /// # Errors
    /// Returns `SettingsError::Store` when the store call fails.
    async fn load_settings(&self, user_id: Uuid) -> Result<Option<SettingsRecord>, SettingsError>;

    /// Partially update one user's settings.
    /// Writes exactly the columns present in `payload` and nothing else.
    ///
    /// # Errors
    /// Returns `SettingsError::NotFound` for a user without a settings record
    /// and `SettingsError::Store` when the store rejects the update.
    async fn update_settings(
        &self,
        user_id: Uuid,
        payload: &UpdatePayload,
    ) -> Result<(), SettingsError>;
}

/// Operator-facing toast sink. Not required for correctness.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
