//! Reader state owned by the orchestrator

use std::fmt;

use domain::{
    AudioSettings, LanguageCode, RadioState, SessionStatus, TagReadResult, VoiceDescriptor,
};
use serde::Serialize;

/// Startup progress of the reader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReaderPhase {
    #[default]
    Uninitialized,
    /// Voice catalog loaded and filtered
    SpeechReady,
    /// Persisted settings merged into the defaults
    SettingsRestored,
    /// Settings pushed to the speech engine
    Configured,
    /// Tag discovery registered
    Listening,
}

impl fmt::Display for ReaderPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Uninitialized => "uninitialized",
            Self::SpeechReady => "speech_ready",
            Self::SettingsRestored => "settings_restored",
            Self::Configured => "configured",
            Self::Listening => "listening",
        };
        f.write_str(label)
    }
}

/// Progress of a single tag read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TagReadCycle {
    #[default]
    Idle,
    Detecting,
    Discovered,
    Speaking,
}

/// Everything the presentation layer renders
///
/// Handed out as a snapshot; only `ReaderService` mutates it.
#[derive(Debug, Clone, Serialize)]
pub struct AppState {
    pub phase: ReaderPhase,
    pub tag_cycle: TagReadCycle,
    pub session_status: SessionStatus,
    /// Voices for the device language, catalog order
    pub voices: Vec<VoiceDescriptor>,
    pub settings: AudioSettings,
    /// Text spoken by the next read-aloud request
    pub text: String,
    pub device_language: Option<LanguageCode>,
    /// `false` until the tag service confirmed NFC hardware
    pub nfc_supported: bool,
    pub radio_state: Option<RadioState>,
    pub settings_overlay_open: bool,
    pub last_tag: Option<TagReadResult>,
}

impl AppState {
    pub(crate) fn new(initial_text: String) -> Self {
        Self {
            phase: ReaderPhase::default(),
            tag_cycle: TagReadCycle::default(),
            session_status: SessionStatus::default(),
            voices: Vec::new(),
            settings: AudioSettings::default(),
            text: initial_text,
            device_language: None,
            nfc_supported: false,
            radio_state: None,
            settings_overlay_open: false,
            last_tag: None,
        }
    }

    /// Currently selected voice descriptor
    pub fn selected_voice(&self) -> Option<&VoiceDescriptor> {
        let id = self.settings.selected_voice_id.as_deref()?;
        self.voices.iter().find(|v| v.id == id)
    }
}
