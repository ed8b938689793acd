//! Error types for the bulk user settings SDK.

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Unknown settings field '{field}'")]
    UnknownField { field: String },

    #[error("Invalid value for field '{field}': {message}")]
    InvalidValue { field: String, message: String },

    #[error("No settings record for user {user_id}")]
    NotFound { user_id: Uuid },

    /// The remote store rejected or failed the call.
    #[error("{message}")]
    Store { message: String },
}

impl SettingsError {
    #[must_use]
    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField {
            field: field.into(),
        }
    }

    #[must_use]
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn not_found(user_id: Uuid) -> Self {
        Self::NotFound { user_id }
    }

    #[must_use]
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }
}
