//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// A persisted or user supplied setting could not be interpreted
    #[error("Invalid setting {key}: {reason}")]
    InvalidSetting { key: String, reason: String },

    /// Locale or language tag without a usable language prefix
    #[error("Invalid language: {0}")]
    InvalidLanguage(String),

    /// Voice id not part of the active catalog
    #[error("Voice not found: {0}")]
    VoiceNotFound(String),

    /// Radio state string not recognised
    #[error("Unknown radio state: {0}")]
    UnknownRadioState(String),
}

impl DomainError {
    /// Create an invalid setting error
    pub fn invalid_setting(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
