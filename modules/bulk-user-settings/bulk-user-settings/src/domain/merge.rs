use bulk_user_settings_sdk::SettingsRecord;

use super::field_state::field_state;

/// Merge per-user settings into one initial snapshot.
///
/// - no records: an empty record (every field unset)
/// - one record: returned as-is, nulls included
/// - several: the common value where all records agree, unset otherwise
///
/// The merged record does not say which fields disagreed. Rendering must ask
/// the resolver, which works on the raw records.
#[must_use]
pub fn merge_settings(records: &[SettingsRecord]) -> SettingsRecord {
    match records {
        [] => SettingsRecord::default(),
        [single] => single.clone(),
        [first, ..] => {
            let mut merged = SettingsRecord::new(first.user_id);
            for field in first.values.keys() {
                let state = field_state(*field, records);
                if !state.is_different {
                    merged.set(*field, first.get(*field).clone());
                }
            }
            merged
        }
    }
}
