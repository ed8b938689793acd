use bulk_user_settings_sdk::{FieldValue, SettingValue, SettingsField, SettingsRecord, UserRecord};
use uuid::Uuid;

pub(crate) fn user(name: &str) -> UserRecord {
    UserRecord::new(Uuid::new_v4(), name)
}

pub(crate) fn num(n: i64) -> SettingValue {
    SettingValue::Set(FieldValue::Number(n))
}

pub(crate) fn text(s: &str) -> SettingValue {
    SettingValue::Set(FieldValue::Text(s.to_owned()))
}

pub(crate) fn flag(b: bool) -> SettingValue {
    SettingValue::Set(FieldValue::Bool(b))
}

pub(crate) fn record(user: &UserRecord, values: &[(SettingsField, SettingValue)]) -> SettingsRecord {
    let mut record = SettingsRecord::new(user.user_id);
    for (field, value) in values {
        record.set(*field, value.clone());
    }
    record
}
