use std::collections::HashMap;

use async_trait::async_trait;
use bulk_user_settings_sdk::{
    SettingsError, SettingsRecord, UpdatePayload, UserSettingsStoreClient,
};
use parking_lot::{Mutex, RwLock};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::mapper::{apply_payload, settings_from_raw};

/// Settings store kept in memory as raw rows.
///
/// Loads and updates can be made to fail per user.
#[derive(Default)]
pub struct InMemorySettingsStore {
    rows: RwLock<HashMap<Uuid, Map<String, Value>>>,
    load_failures: RwLock<HashMap<Uuid, String>>,
    update_failures: RwLock<HashMap<Uuid, String>>,
    updates: Mutex<Vec<(Uuid, UpdatePayload)>>,
}

impl InMemorySettingsStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_row(&self, user_id: Uuid, row: Map<String, Value>) {
        self.rows.write().insert(user_id, row);
    }

    #[must_use]
    pub fn row(&self, user_id: Uuid) -> Option<Map<String, Value>> {
        self.rows.read().get(&user_id).cloned()
    }

    pub fn fail_loads_for(&self, user_id: Uuid, message: impl Into<String>) {
        self.load_failures.write().insert(user_id, message.into());
    }

    pub fn fail_updates_for(&self, user_id: Uuid, message: impl Into<String>) {
        self.update_failures.write().insert(user_id, message.into());
    }

    pub fn clear_failures(&self) {
        self.load_failures.write().clear();
        self.update_failures.write().clear();
    }

    /// Every update call in the order received, failed ones included.
    #[must_use]
    pub fn updates(&self) -> Vec<(Uuid, UpdatePayload)> {
        self.updates.lock().clone()
    }
}

#[async_trait]
impl UserSettingsStoreClient for InMemorySettingsStore {
    async fn load_settings(&self, user_id: Uuid) -> Result<Option<SettingsRecord>, SettingsError> {
        if let Some(message) = self.load_failures.read().get(&user_id) {
            return Err(SettingsError::store(message.clone()));
        }
        Ok(self
            .rows
            .read()
            .get(&user_id)
            .map(|row| settings_from_raw(user_id, row)))
    }

    async fn update_settings(
        &self,
        user_id: Uuid,
        payload: &UpdatePayload,
    ) -> Result<(), SettingsError> {
        self.updates.lock().push((user_id, payload.clone()));

        if let Some(message) = self.update_failures.read().get(&user_id) {
            return Err(SettingsError::store(message.clone()));
        }
        let mut rows = self.rows.write();
        let row = rows.get_mut(&user_id).ok_or_else(|| SettingsError::not_found(user_id))?;
        apply_payload(row, payload);
        Ok(())
    }
}
