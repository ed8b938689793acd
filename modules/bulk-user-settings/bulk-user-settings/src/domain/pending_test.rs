#[cfg(test)]
mod tests {
    use super::super::pending::PendingEdits;
    use super::super::test_support::{num, text, user};
    use bulk_user_settings_sdk::{SettingValue, SettingsField};

    fn assert_count_matches(pending: &PendingEdits) {
        let summed: usize = pending.iter().map(|u| u.len()).sum();
        assert_eq!(pending.total_change_count(), summed);
    }

    #[test]
    fn test_edit_is_broadcast_to_whole_selection() {
        let (a, b) = (user("A"), user("B"));
        let mut pending = PendingEdits::new();

        pending.set_field(&[a.clone(), b.clone()], SettingsField::PagingLimit, &num(50));

        assert_eq!(pending.len(), 2);
        assert_eq!(pending.total_change_count(), 2);
        for u in [&a, &b] {
            let entry = pending.user(u.user_id).unwrap();
            assert_eq!(entry.display_name(), u.display_name);
            assert_eq!(entry.get(SettingsField::PagingLimit), Some(&num(50)));
        }
        assert_count_matches(&pending);
    }

    #[test]
    fn test_overwrite_keeps_count() {
        let (a, b) = (user("A"), user("B"));
        let selection = vec![a.clone(), b];
        let mut pending = PendingEdits::new();

        pending.set_field(&selection, SettingsField::PagingLimit, &num(50));
        pending.set_field(&selection, SettingsField::PagingLimit, &num(100));

        assert_eq!(pending.total_change_count(), 2);
        assert_eq!(
            pending.user(a.user_id).unwrap().get(SettingsField::PagingLimit),
            Some(&num(100))
        );
        assert_count_matches(&pending);
    }

    #[test]
    fn test_clearing_last_field_removes_user() {
        let a = user("A");
        let selection = vec![a.clone()];
        let mut pending = PendingEdits::new();

        pending.set_field(&selection, SettingsField::TimeZoneCode, &num(85));
        assert!(pending.has_user(a.user_id));

        pending.set_field(&selection, SettingsField::TimeZoneCode, &SettingValue::Unset);
        assert!(!pending.has_user(a.user_id));
        assert!(pending.is_empty());
        assert_eq!(pending.total_change_count(), 0);
    }

    #[test]
    fn test_clearing_one_of_several_fields_keeps_user() {
        let a = user("A");
        let selection = vec![a.clone()];
        let mut pending = PendingEdits::new();

        pending.set_field(&selection, SettingsField::TimeZoneCode, &num(85));
        pending.set_field(&selection, SettingsField::WorkdayStartTime, &text("09:00"));
        pending.set_field(&selection, SettingsField::TimeZoneCode, &SettingValue::Unset);

        let entry = pending.user(a.user_id).unwrap();
        assert_eq!(entry.len(), 1);
        assert_eq!(entry.get(SettingsField::TimeZoneCode), None);
        assert_count_matches(&pending);
    }

    #[test]
    fn test_explicit_null_is_a_change() {
        let a = user("A");
        let mut pending = PendingEdits::new();

        pending.set_field(
            std::slice::from_ref(&a),
            SettingsField::HomepageArea,
            &SettingValue::Null,
        );

        assert_eq!(pending.total_change_count(), 1);
        assert_eq!(
            pending.user(a.user_id).unwrap().get(SettingsField::HomepageArea),
            Some(&SettingValue::Null)
        );
    }

    #[test]
    fn test_count_across_add_overwrite_and_clear() {
        let (a, b, c) = (user("A"), user("B"), user("C"));
        let all = vec![a.clone(), b.clone(), c.clone()];
        let mut pending = PendingEdits::new();

        pending.set_field(&all, SettingsField::PagingLimit, &num(25));
        pending.set_field(&all[..2], SettingsField::CalendarType, &num(0));
        assert_eq!(pending.total_change_count(), 5);
        assert_count_matches(&pending);

        pending.set_field(&all[1..], SettingsField::PagingLimit, &num(75));
        assert_eq!(pending.total_change_count(), 5);

        pending.set_field(&all, SettingsField::PagingLimit, &SettingValue::Unset);
        assert_eq!(pending.total_change_count(), 2);
        assert!(!pending.has_user(c.user_id));
        assert_count_matches(&pending);

        pending.clear_all();
        assert_eq!(pending.total_change_count(), 0);
        assert!(pending.is_empty());
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let (a, b, c) = (user("A"), user("B"), user("C"));
        let mut pending = PendingEdits::new();

        pending.set_field(&[c.clone()], SettingsField::PagingLimit, &num(25));
        pending.set_field(&[a.clone(), b.clone()], SettingsField::PagingLimit, &num(25));
        pending.set_field(&[b.clone()], SettingsField::TimeZoneCode, &num(4));

        let order: Vec<_> = pending.iter().map(|u| u.user_id()).collect();
        assert_eq!(order, vec![c.user_id, a.user_id, b.user_id]);

        let snapshot = pending.clone();
        pending.remove_saved(&snapshot, &[a.user_id]);
        let order: Vec<_> = pending.iter().map(|u| u.user_id()).collect();
        assert_eq!(order, vec![c.user_id, b.user_id]);
    }

    #[test]
    fn test_remove_saved_keeps_edits_made_after_snapshot() {
        let (a, b) = (user("A"), user("B"));
        let selection = vec![a.clone(), b.clone()];
        let mut pending = PendingEdits::new();
        pending.set_field(&selection, SettingsField::PagingLimit, &num(50));
        pending.set_field(&selection, SettingsField::ShowWeekNumber, &SettingValue::Null);
        let snapshot = pending.clone();

        pending.set_field(&selection, SettingsField::TimeZoneCode, &num(85));
        pending.set_field(&selection, SettingsField::PagingLimit, &num(100));
        pending.remove_saved(&snapshot, &[a.user_id]);

        let entry = pending.user(a.user_id).unwrap();
        assert_eq!(entry.len(), 2);
        assert_eq!(entry.get(SettingsField::PagingLimit), Some(&num(100)));
        assert_eq!(entry.get(SettingsField::TimeZoneCode), Some(&num(85)));
        assert_eq!(entry.get(SettingsField::ShowWeekNumber), None);
        assert_eq!(pending.user(b.user_id).unwrap().len(), 3);
        assert_count_matches(&pending);
    }

    #[test]
    fn test_remove_saved_drops_users_left_without_changes() {
        let (a, b) = (user("A"), user("B"));
        let selection = vec![a.clone(), b.clone()];
        let mut pending = PendingEdits::new();
        pending.set_field(&selection, SettingsField::PagingLimit, &num(50));
        let snapshot = pending.clone();

        pending.remove_saved(&snapshot, &[a.user_id, b.user_id]);

        assert!(pending.is_empty());
        assert_eq!(pending.total_change_count(), 0);
    }

    #[test]
    fn test_edit_for_finds_common_edit() {
        let (a, b) = (user("A"), user("B"));
        let mut pending = PendingEdits::new();
        pending.set_field(&[a.clone(), b.clone()], SettingsField::ReleaseChannel, &num(1));

        assert_eq!(
            pending.edit_for(SettingsField::ReleaseChannel, [a.user_id, b.user_id]),
            Some(&num(1))
        );
        assert_eq!(pending.edit_for(SettingsField::PagingLimit, [a.user_id]), None);
    }
}
