//! User directory the operator picks a selection from.

use bulk_user_settings_sdk::UserRecord;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessUnit {
    pub business_unit_id: Uuid,
    pub name: String,
}

/// A directory entry: the selectable user plus what the directory search looks at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryUser {
    pub user_id: Uuid,
    pub display_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub business_unit_id: Option<Uuid>,
    /// Filled from the directory's business units when absent.
    #[serde(default)]
    pub business_unit_name: Option<String>,
}

impl DirectoryUser {
    #[must_use]
    pub fn record(&self) -> UserRecord {
        UserRecord::new(self.user_id, self.display_name.clone())
    }
}

/// Narrows the directory before selecting.
///
/// `text` is a case-insensitive substring search over name, email and
/// business-unit name; a blank text does not filter. `business_unit_id` keeps
/// only that unit's users. Both must hold when both are given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryFilter {
    pub text: Option<String>,
    pub business_unit_id: Option<Uuid>,
}

impl DirectoryFilter {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search_term().is_none() && self.business_unit_id.is_none()
    }

    fn search_term(&self) -> Option<String> {
        self.text
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
    }

    #[must_use]
    pub fn matches(&self, user: &DirectoryUser) -> bool {
        if self
            .business_unit_id
            .is_some_and(|unit| user.business_unit_id != Some(unit))
        {
            return false;
        }
        let Some(term) = self.search_term() else {
            return true;
        };
        [
            Some(user.display_name.as_str()),
            user.email.as_deref(),
            user.business_unit_name.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|s| s.to_lowercase().contains(&term))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    users: Vec<DirectoryUser>,
    business_units: Vec<BusinessUnit>,
}

impl Directory {
    /// Business units are kept sorted by name; users missing a business-unit
    /// name get the one of their unit.
    #[must_use]
    pub fn new(mut users: Vec<DirectoryUser>, mut business_units: Vec<BusinessUnit>) -> Self {
        business_units.sort_by_key(|u| u.name.to_lowercase());
        for user in &mut users {
            if user.business_unit_name.is_some() {
                continue;
            }
            user.business_unit_name = user.business_unit_id.and_then(|id| {
                business_units
                    .iter()
                    .find(|u| u.business_unit_id == id)
                    .map(|u| u.name.clone())
            });
        }
        Self {
            users,
            business_units,
        }
    }

    #[must_use]
    pub fn users(&self) -> &[DirectoryUser] {
        &self.users
    }

    #[must_use]
    pub fn business_units(&self) -> &[BusinessUnit] {
        &self.business_units
    }

    /// Look a business unit up by id or by case-insensitive name.
    #[must_use]
    pub fn find_business_unit(&self, key: &str) -> Option<&BusinessUnit> {
        if let Ok(id) = key.parse::<Uuid>() {
            return self.business_units.iter().find(|u| u.business_unit_id == id);
        }
        self.business_units
            .iter()
            .find(|u| u.name.eq_ignore_ascii_case(key.trim()))
    }

    /// Users passing `filter`, in directory order.
    #[must_use]
    pub fn filter(&self, filter: &DirectoryFilter) -> Vec<&DirectoryUser> {
        let matched: Vec<_> = self.users.iter().filter(|u| filter.matches(u)).collect();
        debug!(
            total = self.users.len(),
            matched = matched.len(),
            "Directory filtered"
        );
        matched
    }
}
