//! Bulk user settings SDK
//!
//! This crate provides the public contract for the bulk-user-settings module:
//! - `UserSettingsStoreClient` trait for the remote settings store
//! - `Notifier` trait for operator-facing toasts
//! - Field schema (`SettingsField`, `FieldKind`)
//! - Model types (`SettingValue`, `SettingsRecord`, `UpdatePayload`, `BatchOutcome`)
//! - Error type (`SettingsError`)
//!
//! The core crate consumes the store through the trait only:
//! ```ignore
//! let store: Arc<dyn UserSettingsStoreClient> = Arc::new(MyDataverseStore::new(conn));
//! let record = store.load_settings(user_id).await?;
//! ```

#![forbid(unsafe_code)]

pub mod api;
pub mod errors;
pub mod fields;
pub mod models;

pub use api::{Notifier, UserSettingsStoreClient};
pub use errors::SettingsError;
pub use fields::{FieldKind, OptionSet, SettingsField};
pub use models::{
    BatchOutcome, FieldValue, Notification, SaveVerdict, SettingValue, SettingsRecord, Severity,
    UpdatePayload, UserFailure, UserRecord,
};
