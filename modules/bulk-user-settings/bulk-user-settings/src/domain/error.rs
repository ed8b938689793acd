use bulk_user_settings_sdk::SettingsError;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// A pending change cannot be turned into an update payload.
    #[error("Invalid pending change for field '{field}': {message}")]
    InvalidPayload { field: String, message: String },

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

impl DomainError {
    #[must_use]
    pub fn invalid_payload(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPayload {
            field: field.into(),
            message: message.into(),
        }
    }
}
