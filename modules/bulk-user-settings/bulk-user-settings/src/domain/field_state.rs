//! Field state resolver.
//!
//! Everything here is derived on demand from the raw per-user records; nothing
//! is cached, so the result always reflects the current selection.

use bulk_user_settings_sdk::{SettingValue, SettingsField, SettingsRecord, UserRecord};
use tracing::warn;

use super::pending::PendingEdits;

/// Agreement of one field across the loaded records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldState {
    /// The common value, `Unset` when the records disagree.
    pub value: SettingValue,
    pub is_different: bool,
}

/// What a field control shows after pending edits take precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveFieldValue {
    pub value: SettingValue,
    pub show_no_change: bool,
    pub state: FieldState,
}

/// One user's value in the breakdown of a disagreeing field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDifference {
    pub user: UserRecord,
    pub value: SettingValue,
}

#[must_use]
pub fn field_state(field: SettingsField, all_settings: &[SettingsRecord]) -> FieldState {
    let Some((first, rest)) = all_settings.split_first() else {
        return FieldState {
            value: SettingValue::Unset,
            is_different: false,
        };
    };

    let first_value = first.get(field);
    let all_same = rest.iter().all(|r| r.get(field).same_as(first_value));

    FieldState {
        value: if all_same {
            first_value.clone()
        } else {
            SettingValue::Unset
        },
        is_different: !all_same,
    }
}

/// Resolve the effective value of `field` for the users behind `all_settings`.
///
/// A pending edit always wins, including over a disagreement, so the operator
/// can force one value onto users that started out different.
#[must_use]
pub fn resolve(
    field: SettingsField,
    all_settings: &[SettingsRecord],
    pending: &PendingEdits,
) -> EffectiveFieldValue {
    let state = field_state(field, all_settings);
    let edited = pending.edit_for(field, all_settings.iter().map(|r| r.user_id));

    match edited {
        Some(value) => EffectiveFieldValue {
            value: value.clone(),
            show_no_change: false,
            state,
        },
        None if state.is_different => EffectiveFieldValue {
            value: SettingValue::Unset,
            show_no_change: true,
            state,
        },
        None => EffectiveFieldValue {
            value: state.value.clone(),
            show_no_change: false,
            state,
        },
    }
}

/// Per-user breakdown of `field`, or `None` when there is nothing to show.
///
/// `users` and `all_settings` pair up by position.
#[must_use]
pub fn field_differences(
    field: SettingsField,
    users: &[UserRecord],
    all_settings: &[SettingsRecord],
) -> Option<Vec<FieldDifference>> {
    if users.len() <= 1 || all_settings.len() <= 1 {
        return None;
    }
    if users.len() != all_settings.len() {
        warn!(
            users = users.len(),
            settings = all_settings.len(),
            "Mismatch between users and settings lengths, no differences computed"
        );
        return None;
    }

    if !field_state(field, all_settings).is_different {
        return None;
    }

    Some(
        users
            .iter()
            .zip(all_settings)
            .map(|(user, settings)| FieldDifference {
                user: user.clone(),
                value: settings.get(field).clone(),
            })
            .collect(),
    )
}
