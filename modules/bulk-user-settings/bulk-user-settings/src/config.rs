use std::path::Path;
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

/// Environment variable prefix, e.g. `BULK_SETTINGS_NOTIFICATION_DURATION_MS`.
pub const ENV_PREFIX: &str = "BULK_SETTINGS_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BulkSettingsConfig {
    /// How long operator toasts stay visible.
    pub notification_duration_ms: u64,

    /// Control text when selected users disagree and nothing is pending.
    pub no_change_label: String,

    /// Text for an absent value in per-user breakdowns.
    pub not_set_label: String,
}

impl Default for BulkSettingsConfig {
    fn default() -> Self {
        Self {
            notification_duration_ms: 3000,
            no_change_label: "No change".to_owned(),
            not_set_label: "Not set".to_owned(),
        }
    }
}

impl BulkSettingsConfig {
    #[must_use]
    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_duration_ms)
    }

    /// Defaults, then the optional YAML file, then `BULK_SETTINGS_*` variables.
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// # Errors
    /// Returns an error when an explicit `path` does not exist, or when a source
    /// cannot be read or holds unknown or mistyped keys.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(missing) = path.filter(|p| !p.is_file()) {
            anyhow::bail!("configuration file not found: {}", missing.display());
        }
        Self::figment(path)
            .extract()
            .map_err(|e| anyhow::anyhow!("invalid bulk settings configuration: {e}"))
    }
}
