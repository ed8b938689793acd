//! JSON store fixture the CLI runs against.
//!
//! ```json
//! {
//!   "users": [{ "user_id": "...", "display_name": "Alice", "email": "alice@contoso.com",
//!               "business_unit_id": "..." }],
//!   "business_units": [{ "business_unit_id": "...", "name": "Sales" }],
//!   "settings": { "<user_id>": { "paginglimit": 50, "_transactioncurrencyid_value": "..." } },
//!   "catalog": { "timezones": { "85": "(GMT+00:00) London" } },
//!   "fail_updates": { "<user_id>": "Access denied" }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, anyhow, bail};
use bulk_user_settings::{BusinessUnit, Directory, DirectoryFilter, DirectoryUser, LookupCatalog};
use bulk_user_settings::infra::storage::InMemorySettingsStore;
use bulk_user_settings_sdk::UserRecord;
use serde::Deserialize;
use serde_json::{Map, Value};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreFixture {
    pub users: Vec<DirectoryUser>,
    #[serde(default)]
    pub business_units: Vec<BusinessUnit>,
    /// Raw settings rows keyed by user id. Users without a row have no settings.
    #[serde(default)]
    pub settings: HashMap<Uuid, Map<String, Value>>,
    #[serde(default)]
    pub catalog: LookupCatalog,
    /// Update failure message per user id.
    #[serde(default)]
    pub fail_updates: HashMap<Uuid, String>,
}

impl StoreFixture {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read fixture {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid fixture {}", path.display()))
    }

    /// Build the in-memory store, consuming the rows.
    #[must_use]
    pub fn into_store(self) -> (InMemorySettingsStore, Directory, LookupCatalog) {
        let store = InMemorySettingsStore::new();
        for (user_id, row) in self.settings {
            store.insert_row(user_id, row);
        }
        for (user_id, message) in self.fail_updates {
            store.fail_updates_for(user_id, message);
        }
        (
            store,
            Directory::new(self.users, self.business_units),
            self.catalog,
        )
    }
}

/// Build the directory filter from `--filter` and `--business-unit` (id or name).
pub fn directory_filter(
    directory: &Directory,
    text: Option<&str>,
    business_unit: Option<&str>,
) -> anyhow::Result<DirectoryFilter> {
    let business_unit_id = business_unit
        .map(|key| {
            directory
                .find_business_unit(key)
                .map(|unit| unit.business_unit_id)
                .ok_or_else(|| anyhow!("unknown business unit '{key}'"))
        })
        .transpose()?;
    Ok(DirectoryFilter {
        text: text.map(str::to_owned),
        business_unit_id,
    })
}

/// Pick the selection from the users passing `filter`.
///
/// Without `--user` arguments every filtered user is selected; with them, each
/// must name a filtered user.
pub fn select_users(
    directory: &Directory,
    filter: &DirectoryFilter,
    wanted: &[String],
) -> anyhow::Result<Vec<UserRecord>> {
    if wanted.is_empty() && filter.is_empty() {
        bail!("select users with --user, --filter or --business-unit");
    }
    let candidates: Vec<UserRecord> = directory
        .filter(filter)
        .into_iter()
        .map(DirectoryUser::record)
        .collect();
    if wanted.is_empty() {
        if candidates.is_empty() {
            bail!("no user matches the directory filter");
        }
        return Ok(candidates);
    }
    resolve_users(&candidates, wanted)
}

/// Resolve `--user` arguments by id or by case-insensitive display name.
pub fn resolve_users(
    known: &[UserRecord],
    wanted: &[String],
) -> anyhow::Result<Vec<UserRecord>> {
    let mut selected: Vec<UserRecord> = Vec::with_capacity(wanted.len());
    for key in wanted {
        let user = if let Ok(id) = key.parse::<Uuid>() {
            known.iter().find(|u| u.user_id == id)
        } else {
            find_by_name(known, key)?
        };
        let Some(user) = user else {
            bail!("unknown user '{key}'");
        };
        if !selected.iter().any(|u| u.user_id == user.user_id) {
            selected.push(user.clone());
        }
    }
    Ok(selected)
}

fn find_by_name<'a>(
    known: &'a [UserRecord],
    name: &str,
) -> anyhow::Result<Option<&'a UserRecord>> {
    let mut matches = known
        .iter()
        .filter(|u| u.display_name.eq_ignore_ascii_case(name));
    let first = matches.next();
    if matches.next().is_some() {
        bail!("user name '{name}' is ambiguous, select by id");
    }
    Ok(first)
}
