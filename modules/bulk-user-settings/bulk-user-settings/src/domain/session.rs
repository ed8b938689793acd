//! Selection session.
//!
//! Owns everything derived from the current selection and guards every
//! asynchronous commit with a selection generation: a load or save that
//! finishes after the selection changed is not applied.

use std::sync::Arc;

use bulk_user_settings_sdk::{
    BatchOutcome, Notification, Notifier, SaveVerdict, SettingValue, SettingsField,
    SettingsRecord, Severity, UserRecord, UserSettingsStoreClient,
};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::batch::{BatchUpdater, SaveProgressObserver};
use super::error::DomainError;
use super::field_state::{EffectiveFieldValue, FieldDifference, field_differences, resolve};
use super::loader::{LoadedSelection, load_selection};
use super::merge::merge_settings;
use super::pending::PendingEdits;
use crate::config::BulkSettingsConfig;

#[derive(Default)]
struct SessionState {
    generation: u64,
    selection: Vec<UserRecord>,
    loaded: LoadedSelection,
    merged: SettingsRecord,
    pending: PendingEdits,
    loading: bool,
}

/// Result of one save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    pub outcome: BatchOutcome,
    pub verdict: SaveVerdict,
    /// False when the selection changed while saving and the result was discarded.
    pub applied: bool,
}

pub struct SettingsSession {
    client: Arc<dyn UserSettingsStoreClient>,
    notifier: Arc<dyn Notifier>,
    config: BulkSettingsConfig,
    state: Mutex<SessionState>,
}

impl SettingsSession {
    #[must_use]
    pub fn new(
        client: Arc<dyn UserSettingsStoreClient>,
        notifier: Arc<dyn Notifier>,
        config: BulkSettingsConfig,
    ) -> Self {
        Self {
            client,
            notifier,
            config,
            state: Mutex::new(SessionState::default()),
        }
    }

    #[must_use]
    pub fn config(&self) -> &BulkSettingsConfig {
        &self.config
    }

    /// Replace the selection and load its settings.
    ///
    /// Returns false when another selection superseded this one before the load finished.
    pub async fn select(&self, users: Vec<UserRecord>) -> bool {
        let generation = {
            let mut state = self.state.lock();
            state.generation += 1;
            state.selection.clone_from(&users);
            state.loaded = LoadedSelection::default();
            state.merged = SettingsRecord::default();
            state.pending.clear_all();
            state.loading = !users.is_empty();
            state.generation
        };
        debug!(generation, users = users.len(), "Selection changed");

        if users.is_empty() {
            return true;
        }
        self.load_generation(generation, &users).await
    }

    /// Load the current selection again, e.g. after a save.
    pub async fn reload(&self) -> bool {
        let (generation, users) = {
            let mut state = self.state.lock();
            state.loading = !state.selection.is_empty();
            (state.generation, state.selection.clone())
        };
        if users.is_empty() {
            return true;
        }
        self.load_generation(generation, &users).await
    }

    async fn load_generation(&self, generation: u64, users: &[UserRecord]) -> bool {
        let loaded = load_selection(self.client.as_ref(), users).await;

        {
            let mut state = self.state.lock();
            if state.generation != generation {
                debug!(generation, current = state.generation, "Discarding stale settings load");
                return false;
            }
            state.merged = merge_settings(loaded.settings());
            state.loaded = loaded;
            state.loading = false;
            if !state.loaded.is_empty() {
                return true;
            }
        }

        self.notify(
            "No settings",
            "No user settings available for the selected users",
            Severity::Warning,
        );
        true
    }

    /// Broadcast one edit to every loaded user of the selection.
    ///
    /// Users whose settings failed to load are not edited.
    pub fn set_field(&self, field: SettingsField, value: &SettingValue) {
        let mut state = self.state.lock();
        let SessionState {
            loaded, pending, ..
        } = &mut *state;

        pending.set_field(loaded.users(), field, value);
        if !value.is_unset() {
            for dependent in field.dependents() {
                pending.set_field(loaded.users(), *dependent, &SettingValue::Unset);
            }
        }
        debug!(%field, total = pending.total_change_count(), "Pending edit updated");
    }

    /// Drop every pending edit.
    pub fn discard_changes(&self) {
        self.state.lock().pending.clear_all();
    }

    #[must_use]
    pub fn selection(&self) -> Vec<UserRecord> {
        self.state.lock().selection.clone()
    }

    #[must_use]
    pub fn loaded(&self) -> LoadedSelection {
        self.state.lock().loaded.clone()
    }

    /// Initial snapshot of the merged settings.
    #[must_use]
    pub fn merged(&self) -> SettingsRecord {
        self.state.lock().merged.clone()
    }

    #[must_use]
    pub fn pending(&self) -> PendingEdits {
        self.state.lock().pending.clone()
    }

    #[must_use]
    pub fn effective_value(&self, field: SettingsField) -> EffectiveFieldValue {
        let state = self.state.lock();
        resolve(field, state.loaded.settings(), &state.pending)
    }

    #[must_use]
    pub fn field_differences(&self, field: SettingsField) -> Option<Vec<FieldDifference>> {
        let state = self.state.lock();
        field_differences(field, state.loaded.users(), state.loaded.settings())
    }

    #[must_use]
    pub fn total_changes(&self) -> usize {
        self.state.lock().pending.total_change_count()
    }

    #[must_use]
    pub fn can_save(&self) -> bool {
        self.total_changes() > 0
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }

    /// Header text: the user's name, or how many users are selected.
    #[must_use]
    pub fn selection_label(&self) -> String {
        let state = self.state.lock();
        match state.selection.as_slice() {
            [] => String::new(),
            [single] => single.display_name.clone(),
            many => format!("{} users selected", many.len()),
        }
    }

    /// Save every pending edit and report the outcome to the operator.
    ///
    /// Only the changes this save wrote are removed from the pending set: failed
    /// users keep theirs for a retry, and edits made while saving stay pending.
    ///
    /// # Errors
    /// Returns the orchestrator's setup-level error after notifying it.
    pub async fn save(
        &self,
        progress: Option<&dyn SaveProgressObserver>,
    ) -> Result<SaveReport, DomainError> {
        let (generation, pending) = {
            let state = self.state.lock();
            (state.generation, state.pending.clone())
        };

        let updater = BatchUpdater::new(Arc::clone(&self.client));
        let outcome = match updater.save(&pending, progress).await {
            Ok(outcome) => outcome,
            Err(err) => {
                self.notify(
                    "Error",
                    &format!("Failed to save settings: {err}"),
                    Severity::Error,
                );
                return Err(err);
            }
        };

        let verdict = outcome.verdict();
        self.notify_outcome(&outcome, verdict);

        let applied = {
            let mut state = self.state.lock();
            if state.generation == generation {
                state
                    .pending
                    .remove_saved(&pending, &outcome.successful_user_ids);
                true
            } else {
                warn!(
                    generation,
                    current = state.generation,
                    "Selection changed during save, result not applied"
                );
                false
            }
        };

        if applied && !outcome.successful_user_ids.is_empty() {
            self.reload().await;
        }

        info!(?verdict, applied, "Save finished");
        Ok(SaveReport {
            outcome,
            verdict,
            applied,
        })
    }

    fn notify_outcome(&self, outcome: &BatchOutcome, verdict: SaveVerdict) {
        let saved = outcome.successful_user_ids.len();
        let failed = outcome.failed_user_names().join(", ");
        match verdict {
            SaveVerdict::Nothing => {}
            SaveVerdict::FullSuccess => self.notify(
                "Success",
                &format!("Settings saved for {saved} user(s)"),
                Severity::Success,
            ),
            SaveVerdict::PartialSuccess => self.notify(
                "Partial success",
                &format!(
                    "Saved {saved} of {} user(s). Failed: {failed}",
                    outcome.attempted()
                ),
                Severity::Warning,
            ),
            SaveVerdict::TotalFailure => {
                let reason = outcome
                    .failures
                    .first()
                    .map(|f| f.error_message.as_str())
                    .unwrap_or_default();
                self.notify(
                    "Error",
                    &format!("Failed to save settings for {failed}: {reason}"),
                    Severity::Error,
                );
            }
        }
    }

    fn notify(&self, title: &str, body: &str, severity: Severity) {
        self.notifier.notify(Notification {
            title: title.to_owned(),
            body: body.to_owned(),
            severity,
            duration: self.config.notification_duration(),
        });
    }
}
