//! Raw store rows to settings records, and partial payloads back onto rows.

use bulk_user_settings_sdk::{
    FieldKind, FieldValue, SettingValue, SettingsField, SettingsRecord, UpdatePayload,
};
use serde_json::{Map, Value};
use tracing::debug;
use uuid::Uuid;

const BIND_SUFFIX: &str = "@odata.bind";

/// Map one raw row to a settings record.
///
/// A column of the wrong JSON type is read as unset. Reference columns are
/// also read from their `_<name>_value` lookup form.
#[must_use]
pub fn settings_from_raw(user_id: Uuid, raw: &Map<String, Value>) -> SettingsRecord {
    let mut record = SettingsRecord::new(user_id);
    for field in SettingsField::ALL {
        let Some(column) = raw_column(*field, raw) else {
            continue;
        };
        record.set(*field, coerce(*field, column));
    }
    record
}

fn raw_column(field: SettingsField, raw: &Map<String, Value>) -> Option<&Value> {
    raw.get(field.as_str()).or_else(|| match field.kind() {
        FieldKind::Reference { .. } => raw.get(&format!("_{}_value", field.as_str())),
        _ => None,
    })
}

fn coerce(field: SettingsField, column: &Value) -> SettingValue {
    if column.is_null() {
        return SettingValue::Null;
    }
    let value = match field.kind() {
        FieldKind::Text | FieldKind::Reference { .. } => {
            column.as_str().map(|s| FieldValue::Text(s.to_owned()))
        }
        FieldKind::Number | FieldKind::Choice(_) => column.as_i64().map(FieldValue::Number),
        FieldKind::Boolean => column.as_bool().map(FieldValue::Bool),
    };
    value.map_or_else(
        || {
            debug!(%field, ?column, "Column has unexpected type, reading as unset");
            SettingValue::Unset
        },
        SettingValue::Set,
    )
}

/// Apply a partial update payload to a raw row.
///
/// Reference bindings (`<name>@odata.bind: "/<set>(<id>)"`) are stored as the bare id.
pub fn apply_payload(raw: &mut Map<String, Value>, payload: &UpdatePayload) {
    for (key, value) in payload.iter() {
        if let Some(column) = key.strip_suffix(BIND_SUFFIX) {
            raw.insert(column.to_owned(), bound_id(value));
        } else {
            raw.insert(key.clone(), value.clone());
        }
    }
}

fn bound_id(value: &Value) -> Value {
    value
        .as_str()
        .and_then(|path| {
            let open = path.find('(')?;
            path.strip_suffix(')').map(|p| p[open + 1..].to_owned())
        })
        .map_or(Value::Null, Value::String)
}
