//! Pending edit tracker.
//!
//! Two-level ownership: the tracker owns one entry per user, each entry owns
//! its field changes. An entry exists only while it holds at least one change.
//! Both levels keep insertion order, which is the order a batch save uses.

use bulk_user_settings_sdk::{SettingValue, SettingsField, UserRecord};
use indexmap::IndexMap;
use uuid::Uuid;

/// Uncommitted field changes queued against one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPendingChanges {
    user_id: Uuid,
    display_name: String,
    changes: IndexMap<SettingsField, SettingValue>,
}

impl UserPendingChanges {
    fn new(user: &UserRecord) -> Self {
        Self {
            user_id: user.user_id,
            display_name: user.display_name.clone(),
            changes: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Field changes in the order they were first made.
    pub fn changes(&self) -> impl Iterator<Item = (SettingsField, &SettingValue)> {
        self.changes.iter().map(|(field, value)| (*field, value))
    }

    #[must_use]
    pub fn get(&self, field: SettingsField) -> Option<&SettingValue> {
        self.changes.get(&field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// The single source of truth for what a save will write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingEdits {
    users: IndexMap<Uuid, UserPendingChanges>,
}

impl PendingEdits {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one edit to every user of `selection`.
    ///
    /// `SettingValue::Unset` removes the field from each user's change set and
    /// drops users left without changes; any other value inserts or overwrites it.
    pub fn set_field(
        &mut self,
        selection: &[UserRecord],
        field: SettingsField,
        value: &SettingValue,
    ) {
        if value.is_unset() {
            for user in selection {
                self.clear_field_for(user.user_id, field);
            }
            return;
        }

        for user in selection {
            self.users
                .entry(user.user_id)
                .or_insert_with(|| UserPendingChanges::new(user))
                .changes
                .insert(field, value.clone());
        }
    }

    /// Remove one field change from one user, dropping the user when it was the last one.
    pub fn clear_field_for(&mut self, user_id: Uuid, field: SettingsField) {
        let Some(entry) = self.users.get_mut(&user_id) else {
            return;
        };
        entry.changes.shift_remove(&field);
        if entry.changes.is_empty() {
            self.users.shift_remove(&user_id);
        }
    }

    pub fn clear_all(&mut self) {
        self.users.clear();
    }

    /// Remove the changes of `saved` users that a save wrote from `snapshot`.
    ///
    /// A change made after the snapshot (a new field, or a different value for a
    /// saved field) stays pending. Users left without changes are dropped.
    pub fn remove_saved(&mut self, snapshot: &PendingEdits, saved: &[Uuid]) {
        for user_id in saved {
            let Some(written) = snapshot.users.get(user_id) else {
                continue;
            };
            let Some(entry) = self.users.get_mut(user_id) else {
                continue;
            };
            for (field, value) in &written.changes {
                if entry.changes.get(field) == Some(value) {
                    entry.changes.shift_remove(field);
                }
            }
            if entry.changes.is_empty() {
                self.users.shift_remove(user_id);
            }
        }
    }

    #[must_use]
    pub fn has_user(&self, user_id: Uuid) -> bool {
        self.users.contains_key(&user_id)
    }

    #[must_use]
    pub fn user(&self, user_id: Uuid) -> Option<&UserPendingChanges> {
        self.users.get(&user_id)
    }

    /// Tracked users in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &UserPendingChanges> {
        self.users.values()
    }

    /// Number of tracked users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Sum of field changes over all tracked users.
    #[must_use]
    pub fn total_change_count(&self) -> usize {
        self.users.values().map(UserPendingChanges::len).sum()
    }

    /// The pending edit for `field` among the given users, if any of them has one.
    ///
    /// Edits are broadcast to the whole selection, so the first hit is the common edit.
    pub fn edit_for(
        &self,
        field: SettingsField,
        user_ids: impl IntoIterator<Item = Uuid>,
    ) -> Option<&SettingValue> {
        user_ids
            .into_iter()
            .filter_map(|id| self.users.get(&id))
            .find_map(|entry| entry.changes.get(&field))
    }
}
