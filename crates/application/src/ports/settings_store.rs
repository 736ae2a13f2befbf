//! Settings store port - key-value persistence for audio settings

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Keys under which the audio settings are stored
pub mod keys {
    /// Speech rate, stored as a float string
    pub const SPEECH_RATE: &str = "AUDIO_Speed";
    /// Speech pitch, stored as a float string
    pub const SPEECH_PITCH: &str = "AUDIO_Pitch";
    /// Selected voice id
    pub const VOICE: &str = "AUDIO_Voice";
}

/// Port for persisting scalar settings
///
/// A missing key is a normal first-run condition, not an error.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SettingsStorePort: Send + Sync {
    /// Read a value
    async fn get(&self, key: &str) -> Result<Option<String>, ApplicationError>;

    /// Write a value
    async fn set(&self, key: &str, value: &str) -> Result<(), ApplicationError>;

    /// Write several values as one batch
    async fn set_many(&self, entries: &[(String, String)]) -> Result<(), ApplicationError>;
}
