//! Human-readable text for setting values.

use std::collections::BTreeMap;

use bulk_user_settings_sdk::{FieldValue, SettingValue, SettingsField};
use serde::Deserialize;

use super::field_state::EffectiveFieldValue;
use crate::config::BulkSettingsConfig;

/// Labels of the lookup tables that back id-valued fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LookupCatalog {
    /// Time zone code to display name.
    pub timezones: BTreeMap<i64, String>,
    /// Provisioned UI/help language LCID to display name.
    pub languages: BTreeMap<i64, String>,
    /// Regional format LCID to display name.
    pub formats: BTreeMap<i64, String>,
    pub currencies: BTreeMap<String, String>,
    /// App area id to title.
    pub areas: BTreeMap<String, String>,
    /// Page (sub-area) id to title.
    pub sub_areas: BTreeMap<String, String>,
    pub dashboards: BTreeMap<String, String>,
}

impl LookupCatalog {
    fn label(&self, field: SettingsField, value: &FieldValue) -> Option<&str> {
        let label = match (field, value) {
            (SettingsField::TimeZoneCode, FieldValue::Number(n)) => self.timezones.get(n),
            (SettingsField::UiLanguageId | SettingsField::HelpLanguageId, FieldValue::Number(n)) => {
                self.languages.get(n)
            }
            (SettingsField::LocaleId, FieldValue::Number(n)) => self.formats.get(n),
            (SettingsField::TransactionCurrencyId, FieldValue::Text(id)) => self.currencies.get(id),
            (SettingsField::HomepageArea, FieldValue::Text(id)) => self.areas.get(id),
            (SettingsField::HomepageSubarea, FieldValue::Text(id)) => self.sub_areas.get(id),
            (SettingsField::DefaultDashboardId, FieldValue::Text(id)) => self.dashboards.get(id),
            _ => None,
        };
        label.map(String::as_str)
    }
}

/// Text for one stored value, as shown in a per-user breakdown.
#[must_use]
pub fn format_field_value(
    field: SettingsField,
    value: &SettingValue,
    catalog: &LookupCatalog,
    config: &BulkSettingsConfig,
) -> String {
    let Some(value) = value.as_value() else {
        return config.not_set_label.clone();
    };

    if let Some(label) = catalog.label(field, value) {
        return label.to_owned();
    }

    match value {
        FieldValue::Bool(true) => "Yes".to_owned(),
        FieldValue::Bool(false) => "No".to_owned(),
        FieldValue::Number(code) => field
            .option_label(*code)
            .map_or_else(|| code.to_string(), str::to_owned),
        FieldValue::Text(text) => text.clone(),
    }
}

/// Text of a field control: the "no change" label when users disagree without
/// a pending edit, or when there is no value to show.
#[must_use]
pub fn display_effective(
    field: SettingsField,
    effective: &EffectiveFieldValue,
    catalog: &LookupCatalog,
    config: &BulkSettingsConfig,
) -> String {
    if effective.show_no_change || effective.value.is_absent() {
        return config.no_change_label.clone();
    }
    format_field_value(field, &effective.value, catalog, config)
}
