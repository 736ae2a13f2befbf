//! Startup sequence: speech readiness, settings restore, configuration

use std::{str::FromStr, sync::Arc};

use domain::{DomainError, SessionStatus, SpeechPitch, SpeechRate};
use tracing::{debug, info, instrument};

use super::{ReaderPhase, ReaderService, ReaderStep};
use crate::ports::keys;
use crate::services::voice_selection::{device_language, offline_voices, select_voices};

impl ReaderService {
    /// Run the startup sequence
    ///
    /// Steps run one after another; a failing step is skipped and the next
    /// one still runs.
    #[instrument(skip(self))]
    pub async fn start(self: &Arc<Self>) {
        self.prepare_speech().await;
        self.restore_settings().await;
        self.apply_settings().await;
        self.prepare_tags().await;
        info!(phase = %self.state.read().phase, "Reader started");
    }

    /// Load the voice catalog and pick a default voice for the device language
    async fn prepare_speech(&self) {
        self.settle(ReaderStep::SpeechInit, self.speech.init_status().await);

        let catalog = self
            .settle(ReaderStep::VoiceCatalog, self.speech.voices().await)
            .unwrap_or_default();
        let language = self.settle(
            ReaderStep::DeviceLanguage,
            device_language(self.locale.as_ref(), &self.config.fallback_locale)
                .map_err(Into::into),
        );
        let voices = language
            .as_ref()
            .map(|language| select_voices(&offline_voices(catalog), language))
            .unwrap_or_default();

        if let Some(first) = voices.first() {
            self.settle(
                ReaderStep::DefaultLanguage,
                self.speech.set_default_language(&first.language_tag).await,
            );
            self.settle(
                ReaderStep::DefaultVoice,
                self.speech.set_default_voice(&first.id).await,
            );
        } else {
            info!(language = ?language, "No offline voice for the device language");
        }

        {
            let mut state = self.state.write();
            state.voices.clone_from(&voices);
            state.settings.selected_voice_id = voices.first().map(|v| v.id.clone());
            state.device_language = language;
            if state.session_status == SessionStatus::Initializing {
                state.session_status = SessionStatus::Initialized;
            }
        }
        debug!(count = voices.len(), "Voices available");
        self.transition(ReaderPhase::SpeechReady);
    }

    /// Merge persisted rate, pitch and voice into the in-memory settings
    async fn restore_settings(&self) {
        let rate: Option<SpeechRate> = self.load_setting(keys::SPEECH_RATE).await;
        let pitch: Option<SpeechPitch> = self.load_setting(keys::SPEECH_PITCH).await;
        let voice = self
            .settle(ReaderStep::RestoreSettings, self.store.get(keys::VOICE).await)
            .flatten()
            .filter(|id| !id.is_empty());

        let mut state = self.state.write();
        if let Some(rate) = rate {
            state.settings.rate = rate;
        }
        if let Some(pitch) = pitch {
            state.settings.pitch = pitch;
        }
        if voice.is_some() {
            state.settings.selected_voice_id = voice;
        }
        let voices = state.voices.clone();
        if let Some(stale) = state.settings.retain_voice_from(&voices) {
            info!(voice = %stale, "Persisted voice not available, using default");
        }
        drop(state);

        self.transition(ReaderPhase::SettingsRestored);
    }

    async fn load_setting<T>(&self, key: &str) -> Option<T>
    where
        T: FromStr<Err = DomainError>,
    {
        let raw = self
            .settle(ReaderStep::RestoreSettings, self.store.get(key).await)
            .flatten()?;
        self.settle(
            ReaderStep::RestoreSettings,
            raw.parse::<T>().map_err(Into::into),
        )
    }

    /// Push the resolved settings to the speech engine
    async fn apply_settings(&self) {
        let settings = self.state.read().settings.clone();
        if let Some(voice_id) = &settings.selected_voice_id {
            self.settle(
                ReaderStep::DefaultVoice,
                self.speech.set_default_voice(voice_id).await,
            );
        }
        self.settle(
            ReaderStep::ApplyPitch,
            self.speech.set_default_pitch(settings.pitch).await,
        );
        self.settle(
            ReaderStep::ApplyRate,
            self.speech.set_default_rate(settings.rate).await,
        );
        self.transition(ReaderPhase::Configured);
    }

    /// Check NFC support, then listen or process the launch tag
    async fn prepare_tags(self: &Arc<Self>) {
        let supported = self.tags.is_supported().await;
        self.state.write().nfc_supported = supported;
        if !supported {
            info!("NFC not supported, tag reading disabled");
            return;
        }

        self.settle(ReaderStep::TagStart, self.tags.start().await);

        if self.config.capabilities.requires_explicit_tag_session_start {
            self.start_tag_detection().await;
        } else if let Some(message) = self
            .settle(ReaderStep::LaunchTag, self.tags.read_launch_tag().await)
            .flatten()
        {
            debug!(bytes = message.len(), "Processing launch tag");
            self.tag_discovered(message).await;
        }
    }
}
