//! Speech port - Interface to the platform text-to-speech engine

use std::sync::Arc;

use async_trait::async_trait;
use domain::{SpeechEvent, SpeechPitch, SpeechRate, VoiceDescriptor};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;
use crate::ports::Subscription;

/// Callback for speech lifecycle events
pub type SpeechEventListener = Arc<dyn Fn(SpeechEvent) + Send + Sync>;

/// Voice as reported by the engine, before any filtering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogVoice {
    /// Engine voice identifier
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Language tag (e.g. "es-CL")
    pub language: String,
    /// Voice streams from a server
    #[serde(default)]
    pub network_connection_required: bool,
    /// Voice data still has to be downloaded
    #[serde(default)]
    pub not_installed: bool,
}

impl CatalogVoice {
    /// Installed voice that works offline
    pub fn local(
        id: impl Into<String>,
        name: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            language: language.into(),
            network_connection_required: false,
            not_installed: false,
        }
    }

    /// Usable without network and without a download
    pub const fn is_offline_ready(&self) -> bool {
        !self.network_connection_required && !self.not_installed
    }

    /// Convert into the session voice descriptor
    pub fn to_descriptor(&self) -> VoiceDescriptor {
        VoiceDescriptor::new(self.id.clone(), self.name.clone(), self.language.clone())
    }
}

/// Port for the text-to-speech engine
///
/// The engine does not serialize calls; callers stop before speaking.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SpeechPort: Send + Sync {
    /// Resolve once the engine is ready
    async fn init_status(&self) -> Result<(), ApplicationError>;

    /// Full voice catalog
    async fn voices(&self) -> Result<Vec<CatalogVoice>, ApplicationError>;

    /// Set the engine language
    ///
    /// Engines commonly reject languages they report voices for; callers
    /// treat `UnsupportedOperation` as non-fatal.
    async fn set_default_language(&self, language_tag: &str) -> Result<(), ApplicationError>;

    /// Select the voice used for subsequent utterances
    async fn set_default_voice(&self, voice_id: &str) -> Result<(), ApplicationError>;

    /// Set the speaking rate
    async fn set_default_rate(&self, rate: SpeechRate) -> Result<(), ApplicationError>;

    /// Set the pitch
    async fn set_default_pitch(&self, pitch: SpeechPitch) -> Result<(), ApplicationError>;

    /// Queue an utterance
    async fn speak(&self, text: &str) -> Result<(), ApplicationError>;

    /// Stop playback and drop queued utterances
    async fn stop(&self) -> Result<(), ApplicationError>;

    /// Register for `tts-start`, `tts-finish` and `tts-cancel`
    fn add_event_listener(&self, listener: SpeechEventListener) -> Subscription;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_ready_requires_installed_local_voice() {
        let mut voice = CatalogVoice::local("v1", "Uno", "es-CL");
        assert!(voice.is_offline_ready());
        voice.network_connection_required = true;
        assert!(!voice.is_offline_ready());
        voice.network_connection_required = false;
        voice.not_installed = true;
        assert!(!voice.is_offline_ready());
    }

    #[test]
    fn descriptor_keeps_fields() {
        let descriptor = CatalogVoice::local("v1", "Uno", "es-CL").to_descriptor();
        assert_eq!(descriptor, VoiceDescriptor::new("v1", "Uno", "es-CL"));
    }

    #[tokio::test]
    async fn mock_reports_unsupported_language() {
        let mut speech = MockSpeechPort::new();
        speech
            .expect_set_default_language()
            .returning(|_| Err(ApplicationError::UnsupportedOperation("es-CL".into())));

        let result = speech.set_default_language("es-CL").await;
        assert!(matches!(
            result,
            Err(ApplicationError::UnsupportedOperation(_))
        ));
    }
}
