//! Application-level errors

use domain::DomainError;
use nfc_ndef::NdefError;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Tag payload could not be decoded or encoded
    #[error(transparent)]
    Ndef(#[from] NdefError),

    /// Service refused an operation it does not support (e.g. a language)
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Settings store read or write failed
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Device lacks the capability (no NFC, no voices)
    #[error("Capability absent: {0}")]
    CapabilityAbsent(String),

    /// Any other failure reported by a platform service
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Coarse failure taxonomy used for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    UnsupportedOperation,
    Persistence,
    Decode,
    CapabilityAbsent,
    Service,
}

impl ApplicationError {
    /// Classify the error
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Domain(_) | Self::Ndef(_) => FailureKind::Decode,
            Self::UnsupportedOperation(_) => FailureKind::UnsupportedOperation,
            Self::Persistence(_) => FailureKind::Persistence,
            Self::CapabilityAbsent(_) => FailureKind::CapabilityAbsent,
            Self::ExternalService(_) | Self::Configuration(_) => FailureKind::Service,
        }
    }
}
