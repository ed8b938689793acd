#[cfg(test)]
mod tests {
    use super::super::memory_store::InMemorySettingsStore;
    use crate::domain::loader::load_selection;
    use bulk_user_settings_sdk::{
        FieldValue, SettingValue, SettingsError, SettingsField, UpdatePayload, UserRecord,
        UserSettingsStoreClient,
    };
    use serde_json::{Map, Value, json};
    use tracing_test::traced_test;
    use uuid::Uuid;

    fn row(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_load_returns_mapped_record() {
        let store = InMemorySettingsStore::new();
        let id = Uuid::new_v4();
        store.insert_row(id, row(json!({ "paginglimit": 75 })));

        let record = store.load_settings(id).await.unwrap().unwrap();

        assert_eq!(record.user_id, id);
        assert_eq!(
            record.get(SettingsField::PagingLimit),
            &SettingValue::Set(FieldValue::Number(75))
        );
        assert!(store.load_settings(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_applies_and_is_recorded() {
        let store = InMemorySettingsStore::new();
        let id = Uuid::new_v4();
        store.insert_row(id, row(json!({ "paginglimit": 25, "timezonecode": 4 })));
        let mut payload = UpdatePayload::new();
        payload.insert("paginglimit", json!(100));

        store.update_settings(id, &payload).await.unwrap();

        assert_eq!(
            store.row(id).unwrap(),
            row(json!({ "paginglimit": 100, "timezonecode": 4 }))
        );
        assert_eq!(store.updates(), vec![(id, payload)]);
    }

    #[tokio::test]
    async fn test_update_of_unknown_user_is_not_found() {
        let store = InMemorySettingsStore::new();
        let id = Uuid::new_v4();

        let err = store
            .update_settings(id, &UpdatePayload::new())
            .await
            .unwrap_err();

        assert_eq!(err, SettingsError::not_found(id));
    }

    #[tokio::test]
    async fn test_injected_failures_until_cleared() {
        let store = InMemorySettingsStore::new();
        let id = Uuid::new_v4();
        store.insert_row(id, row(json!({})));
        store.fail_loads_for(id, "timeout");
        store.fail_updates_for(id, "Access denied");

        assert_eq!(
            store.load_settings(id).await.unwrap_err(),
            SettingsError::store("timeout")
        );
        let err = store
            .update_settings(id, &UpdatePayload::new())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Access denied");
        assert_eq!(store.updates().len(), 1);

        store.clear_failures();
        assert!(store.load_settings(id).await.unwrap().is_some());
        assert!(store.update_settings(id, &UpdatePayload::new()).await.is_ok());
    }

    #[tokio::test]
    #[traced_test]
    async fn test_failed_load_is_logged_and_excluded() {
        let store = InMemorySettingsStore::new();
        let (ok, broken, missing) = (
            UserRecord::new(Uuid::new_v4(), "Alice"),
            UserRecord::new(Uuid::new_v4(), "Bob"),
            UserRecord::new(Uuid::new_v4(), "Carol"),
        );
        store.insert_row(ok.user_id, row(json!({})));
        store.insert_row(broken.user_id, row(json!({})));
        store.fail_loads_for(broken.user_id, "timeout");

        let loaded = load_selection(&store, &[ok.clone(), broken.clone(), missing.clone()]).await;

        assert_eq!(loaded.users(), std::slice::from_ref(&ok));
        assert_eq!(loaded.settings().len(), 1);
        assert_eq!(loaded.failed(), &[broken, missing]);
        assert!(logs_contain("Error loading settings for user"));
        assert!(logs_contain("No settings record for user"));
    }
}
