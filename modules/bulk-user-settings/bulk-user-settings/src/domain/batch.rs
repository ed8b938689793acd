//! Batch update orchestrator.
//!
//! Turns the pending edit set into one partial update per user and runs them
//! strictly one after another. A failing user never stops the batch.

use std::sync::Arc;

use bulk_user_settings_sdk::{
    BatchOutcome, FieldKind, SettingValue, SettingsField, UpdatePayload, UserFailure,
    UserSettingsStoreClient,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::error::DomainError;
use super::pending::{PendingEdits, UserPendingChanges};

/// User name reported with the final progress event.
pub const PROGRESS_COMPLETE: &str = "Complete";

/// Position of a batch save, reported before each user and once at the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveProgress<'a> {
    pub index: usize,
    pub total: usize,
    pub user_name: &'a str,
}

/// Observes save progress. Purely informational.
pub trait SaveProgressObserver: Send + Sync {
    fn on_progress(&self, progress: &SaveProgress<'_>);
}

impl<F> SaveProgressObserver for F
where
    F: Fn(&SaveProgress<'_>) + Send + Sync,
{
    fn on_progress(&self, progress: &SaveProgress<'_>) {
        self(progress);
    }
}

/// A ready-to-send partial update for one user.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRequest {
    pub user_id: Uuid,
    pub user_name: String,
    pub payload: UpdatePayload,
}

/// Build the update requests for every tracked user, in insertion order.
///
/// # Errors
/// Returns `DomainError::InvalidPayload` when a pending value does not fit its
/// field. Nothing has been sent at that point.
pub fn build_requests(pending: &PendingEdits) -> Result<Vec<UpdateRequest>, DomainError> {
    pending
        .iter()
        .map(|entry| {
            Ok(UpdateRequest {
                user_id: entry.user_id(),
                user_name: entry.display_name().to_owned(),
                payload: build_payload(entry)?,
            })
        })
        .collect()
}

/// Only the fields present in the change set end up in the payload.
///
/// # Errors
/// Returns `DomainError::InvalidPayload` for a value of the wrong type or a
/// reference without a usable id.
pub fn build_payload(entry: &UserPendingChanges) -> Result<UpdatePayload, DomainError> {
    let mut payload = UpdatePayload::new();
    for (field, value) in entry.changes() {
        match field.kind() {
            FieldKind::Reference { entity_set } => {
                let bound = bind_reference(field, entity_set, value)?;
                payload.insert(format!("{}@odata.bind", field.as_str()), bound);
            }
            _ => payload.insert(field.as_str(), scalar_value(field, value)?),
        }
    }
    Ok(payload)
}

fn scalar_value(
    field: SettingsField,
    value: &SettingValue,
) -> Result<serde_json::Value, DomainError> {
    match value {
        SettingValue::Null => Ok(serde_json::Value::Null),
        SettingValue::Set(v) if field.accepts(v) => Ok(v.to_json()),
        SettingValue::Set(v) => Err(DomainError::invalid_payload(
            field.as_str(),
            format!("expected {}, got {v:?}", field.kind().expected()),
        )),
        SettingValue::Unset => Err(DomainError::invalid_payload(
            field.as_str(),
            "\"no change\" cannot be written",
        )),
    }
}

fn bind_reference(
    field: SettingsField,
    entity_set: &str,
    value: &SettingValue,
) -> Result<serde_json::Value, DomainError> {
    if matches!(value, SettingValue::Null) {
        return Ok(serde_json::Value::Null);
    }
    match value.as_value().and_then(|v| v.as_text()).map(str::trim) {
        Some(id) if !id.is_empty() => Ok(serde_json::Value::String(format!(
            "/{entity_set}({id})"
        ))),
        _ => Err(DomainError::invalid_payload(
            field.as_str(),
            format!("expected {}, got {value:?}", field.kind().expected()),
        )),
    }
}

/// Runs batch saves against the store.
#[derive(Clone)]
pub struct BatchUpdater {
    client: Arc<dyn UserSettingsStoreClient>,
}

impl BatchUpdater {
    #[must_use]
    pub fn new(client: Arc<dyn UserSettingsStoreClient>) -> Self {
        Self { client }
    }

    /// Save every pending user, one at a time, in insertion order.
    ///
    /// Each user lands in exactly one of `successful_user_ids` or `failures`.
    ///
    /// # Errors
    /// Only setup-level defects surface as an error, before any update is sent.
    /// Per-user failures are part of the outcome.
    pub async fn save(
        &self,
        pending: &PendingEdits,
        progress: Option<&dyn SaveProgressObserver>,
    ) -> Result<BatchOutcome, DomainError> {
        if pending.is_empty() {
            debug!("Nothing pending, skipping save");
            return Ok(BatchOutcome::default());
        }

        let requests = build_requests(pending)?;
        let total = requests.len();
        let mut outcome = BatchOutcome::default();

        info!(users = total, changes = pending.total_change_count(), "Saving user settings");

        for (index, request) in requests.iter().enumerate() {
            if let Some(observer) = progress {
                observer.on_progress(&SaveProgress {
                    index,
                    total,
                    user_name: &request.user_name,
                });
            }

            debug!(user_id = %request.user_id, fields = request.payload.len(), "Updating user settings");
            match self
                .client
                .update_settings(request.user_id, &request.payload)
                .await
            {
                Ok(()) => outcome.successful_user_ids.push(request.user_id),
                Err(err) => {
                    warn!(user_id = %request.user_id, error = %err, "User settings update failed");
                    outcome.failures.push(UserFailure {
                        user_id: request.user_id,
                        user_name: request.user_name.clone(),
                        error_message: err.to_string(),
                    });
                }
            }
        }

        if let Some(observer) = progress {
            observer.on_progress(&SaveProgress {
                index: total,
                total,
                user_name: PROGRESS_COMPLETE,
            });
        }

        info!(
            succeeded = outcome.successful_user_ids.len(),
            failed = outcome.failures.len(),
            "User settings save completed"
        );
        Ok(outcome)
    }
}
