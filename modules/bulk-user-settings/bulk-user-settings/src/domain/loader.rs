use bulk_user_settings_sdk::{SettingsRecord, UserRecord, UserSettingsStoreClient};
use futures::future::join_all;
use tracing::{info, warn};

/// Users and their settings, paired by position.
///
/// Only users whose settings loaded are kept; both lists are built together so
/// an index never dangles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedSelection {
    users: Vec<UserRecord>,
    settings: Vec<SettingsRecord>,
    failed: Vec<UserRecord>,
}

impl LoadedSelection {
    fn push(&mut self, user: UserRecord, settings: SettingsRecord) {
        self.users.push(user);
        self.settings.push(settings);
    }

    #[must_use]
    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    #[must_use]
    pub fn settings(&self) -> &[SettingsRecord] {
        &self.settings
    }

    /// Users left out because their settings failed to load or do not exist.
    #[must_use]
    pub fn failed(&self) -> &[UserRecord] {
        &self.failed
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }
}

/// Load settings for every user concurrently.
///
/// A failed load only excludes that user; sibling loads are unaffected.
pub async fn load_selection(
    client: &dyn UserSettingsStoreClient,
    users: &[UserRecord],
) -> LoadedSelection {
    let results = join_all(users.iter().map(|u| client.load_settings(u.user_id))).await;

    let mut loaded = LoadedSelection::default();
    for (user, result) in users.iter().zip(results) {
        match result {
            Ok(Some(settings)) => loaded.push(user.clone(), settings),
            Ok(None) => {
                info!(user_id = %user.user_id, user = %user.display_name, "No settings record for user");
                loaded.failed.push(user.clone());
            }
            Err(err) => {
                warn!(user_id = %user.user_id, user = %user.display_name, error = %err, "Error loading settings for user");
                loaded.failed.push(user.clone());
            }
        }
    }

    info!(
        requested = users.len(),
        loaded = loaded.len(),
        failed = loaded.failed.len(),
        "Loaded user settings"
    );
    loaded
}
