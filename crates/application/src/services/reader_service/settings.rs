//! User intents: settings changes, read-aloud and the settings overlay

use domain::{DomainError, SpeechPitch, SpeechRate};
use tracing::{debug, info, instrument};

use super::{ReaderEvent, ReaderService, ReaderStep};
use crate::error::ApplicationError;
use crate::ports::keys;

impl ReaderService {
    /// Stop any playback, then speak the current text
    ///
    /// At most one utterance plays at a time.
    #[instrument(skip(self))]
    pub async fn read_aloud(&self) {
        let text = self.state.read().text.clone();
        self.settle(ReaderStep::StopSpeech, self.speech.stop().await);
        if text.trim().is_empty() {
            debug!("Nothing to read");
            return;
        }
        self.settle(ReaderStep::Speak, self.speech.speak(&text).await);
    }

    /// Replace the text that the next read-aloud speaks
    pub fn set_text(&self, text: impl Into<String>) {
        self.state.write().text = text.into();
    }

    /// Apply and persist a new speaking rate (clamped to 0.01-0.99)
    #[instrument(skip(self))]
    pub async fn set_rate(&self, rate: f32) {
        let rate = SpeechRate::clamped(rate);
        self.settle(
            ReaderStep::ApplyRate,
            self.speech.set_default_rate(rate).await,
        );
        self.state.write().settings.rate = rate;
        self.settle(
            ReaderStep::PersistSettings,
            self.store.set(keys::SPEECH_RATE, &rate.to_string()).await,
        );
    }

    /// Apply and persist a new pitch (clamped to 0.5-2.0)
    #[instrument(skip(self))]
    pub async fn set_pitch(&self, pitch: f32) {
        let pitch = SpeechPitch::clamped(pitch);
        self.settle(
            ReaderStep::ApplyPitch,
            self.speech.set_default_pitch(pitch).await,
        );
        self.state.write().settings.pitch = pitch;
        self.settle(
            ReaderStep::PersistSettings,
            self.store.set(keys::SPEECH_PITCH, &pitch.to_string()).await,
        );
    }

    /// Switch to another catalog voice and persist all settings together
    ///
    /// Returns `false` if the id is not in the current catalog.
    #[instrument(skip(self))]
    pub async fn select_voice(&self, voice_id: &str) -> bool {
        let voice = self
            .state
            .read()
            .voices
            .iter()
            .find(|v| v.id == voice_id)
            .cloned();
        let Some(voice) = voice else {
            self.settle::<()>(
                ReaderStep::DefaultVoice,
                Err(DomainError::VoiceNotFound(voice_id.to_string()).into()),
            );
            return false;
        };

        self.settle(
            ReaderStep::DefaultLanguage,
            self.speech.set_default_language(&voice.language_tag).await,
        );
        self.settle(
            ReaderStep::DefaultVoice,
            self.speech.set_default_voice(&voice.id).await,
        );

        let settings = {
            let mut state = self.state.write();
            state.settings.selected_voice_id = Some(voice.id.clone());
            state.settings.clone()
        };
        let entries = vec![
            (keys::SPEECH_RATE.to_string(), settings.rate.to_string()),
            (keys::SPEECH_PITCH.to_string(), settings.pitch.to_string()),
            (keys::VOICE.to_string(), voice.id.clone()),
        ];
        self.settle(
            ReaderStep::PersistSettings,
            self.store.set_many(&entries).await,
        );
        info!(voice = %voice.label(), "Voice selected");
        true
    }

    /// Count an activation of the settings gesture
    ///
    /// Returns `true` when this activation opened the overlay.
    pub fn request_settings_overlay(&self) -> bool {
        let opened = self.gesture.lock().activate();
        if opened {
            self.state.write().settings_overlay_open = true;
            self.emit(ReaderEvent::SettingsOverlayOpened);
        }
        opened
    }

    /// Close the settings overlay
    pub fn close_settings_overlay(&self) {
        self.state.write().settings_overlay_open = false;
    }

    /// Persist the current settings in one batch
    ///
    /// # Errors
    ///
    /// Returns the store failure; unlike the intents above this is not
    /// swallowed, so callers can offer a retry.
    pub async fn save_settings(&self) -> Result<(), ApplicationError> {
        let settings = self.state.read().settings.clone();
        let mut entries = vec![
            (keys::SPEECH_RATE.to_string(), settings.rate.to_string()),
            (keys::SPEECH_PITCH.to_string(), settings.pitch.to_string()),
        ];
        if let Some(voice) = settings.selected_voice_id {
            entries.push((keys::VOICE.to_string(), voice));
        }
        self.store.set_many(&entries).await
    }
}
