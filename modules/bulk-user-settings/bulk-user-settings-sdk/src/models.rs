//! Public models for the bulk user settings module.
//!
//! These are transport-agnostic data structures that define the contract
//! between the settings core and the remote store it edits.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::fields::SettingsField;

/// A selectable user. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: Uuid,
    pub display_name: String,
}

impl UserRecord {
    #[must_use]
    pub fn new(user_id: Uuid, display_name: impl Into<String>) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
        }
    }
}

/// A concrete scalar stored in a settings column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Number(i64),
    Bool(bool),
}

impl FieldValue {
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Text(s) => serde_json::Value::String(s.clone()),
            Self::Number(n) => serde_json::Value::from(*n),
            Self::Bool(b) => serde_json::Value::Bool(*b),
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// The value of one field, keeping "not loaded" apart from "deliberately null".
///
/// As a pending edit, `Unset` means "no change" and `Null` means "clear the field".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SettingValue {
    #[default]
    Unset,
    Null,
    Set(FieldValue),
}

impl SettingValue {
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Unset | Self::Null)
    }

    #[must_use]
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    #[must_use]
    pub fn as_value(&self) -> Option<&FieldValue> {
        match self {
            Self::Set(v) => Some(v),
            Self::Unset | Self::Null => None,
        }
    }

    /// Agreement rule used for multi-user comparison.
    ///
    /// `Unset` and `Null` agree with each other and with nothing else; concrete
    /// values agree only when strictly equal.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Set(a), Self::Set(b)) => a == b,
            (a, b) => a.is_absent() && b.is_absent(),
        }
    }
}

impl From<FieldValue> for SettingValue {
    fn from(value: FieldValue) -> Self {
        Self::Set(value)
    }
}

/// One user's settings. A field without an entry reads as `Unset`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SettingsRecord {
    pub user_id: Uuid,
    pub values: BTreeMap<SettingsField, SettingValue>,
}

impl SettingsRecord {
    #[must_use]
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            values: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, field: SettingsField, value: impl Into<SettingValue>) -> Self {
        self.set(field, value.into());
        self
    }

    pub fn set(&mut self, field: SettingsField, value: SettingValue) {
        if value.is_unset() {
            self.values.remove(&field);
        } else {
            self.values.insert(field, value);
        }
    }

    #[must_use]
    pub fn get(&self, field: SettingsField) -> &SettingValue {
        static UNSET: SettingValue = SettingValue::Unset;
        self.values.get(&field).unwrap_or(&UNSET)
    }
}

/// Partial update body for one user: column name to JSON value.
///
/// Fields the operator did not touch are absent; a cleared field is an explicit `null`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct UpdatePayload(serde_json::Map<String, serde_json::Value>);

impl UpdatePayload {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.0.insert(key.into(), value);
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &serde_json::Value)> {
        self.0.iter()
    }

    #[must_use]
    pub fn as_map(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.0
    }
}

/// A user whose update failed during a batch save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserFailure {
    pub user_id: Uuid,
    pub user_name: String,
    pub error_message: String,
}

/// Aggregated result of one batch save.
///
/// Every attempted user appears in exactly one of the two lists.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BatchOutcome {
    pub successful_user_ids: Vec<Uuid>,
    pub failures: Vec<UserFailure>,
}

/// How a batch save ended, from the operator's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveVerdict {
    /// Nothing was pending, nothing was attempted.
    Nothing,
    FullSuccess,
    PartialSuccess,
    TotalFailure,
}

impl BatchOutcome {
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.successful_user_ids.len() + self.failures.len()
    }

    #[must_use]
    pub fn verdict(&self) -> SaveVerdict {
        match (self.successful_user_ids.is_empty(), self.failures.is_empty()) {
            (true, true) => SaveVerdict::Nothing,
            (false, true) => SaveVerdict::FullSuccess,
            (false, false) => SaveVerdict::PartialSuccess,
            (true, false) => SaveVerdict::TotalFailure,
        }
    }

    #[must_use]
    pub fn failed_user_names(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.user_name.as_str()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

/// A fire-and-forget toast shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub severity: Severity,
    pub duration: Duration,
}
