//! Bulk User Settings Module Implementation
//!
//! Reduces the settings of many selected users into one editable view, tracks
//! field-level edits across the selection and writes only the touched fields
//! back to each user with isolated per-user failures.
//!
//! The store contract is defined in `bulk-user-settings-sdk` and re-exported here.

pub use bulk_user_settings_sdk::{
    BatchOutcome, FieldKind, FieldValue, Notification, Notifier, SaveVerdict, SettingValue,
    SettingsError, SettingsField, SettingsRecord, Severity, UpdatePayload, UserFailure,
    UserRecord, UserSettingsStoreClient,
};

pub mod config;
pub use config::BulkSettingsConfig;

pub mod domain;
pub use domain::batch::{BatchUpdater, SaveProgress, SaveProgressObserver, UpdateRequest};
pub use domain::directory::{BusinessUnit, Directory, DirectoryFilter, DirectoryUser};
pub use domain::display::{LookupCatalog, display_effective, format_field_value};
pub use domain::error::DomainError;
pub use domain::field_state::{
    EffectiveFieldValue, FieldDifference, FieldState, field_differences, field_state, resolve,
};
pub use domain::loader::{LoadedSelection, load_selection};
pub use domain::merge::merge_settings;
pub use domain::pending::{PendingEdits, UserPendingChanges};
pub use domain::session::{SaveReport, SettingsSession};

pub mod infra;
