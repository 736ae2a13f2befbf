//! Diagnostic events published by the reader

use std::fmt;

use domain::{SessionStatus, TagReadResult};

use super::state::ReaderPhase;
use crate::error::{ApplicationError, FailureKind};

/// Orchestration step, used to label swallowed failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderStep {
    SpeechInit,
    VoiceCatalog,
    DeviceLanguage,
    DefaultLanguage,
    DefaultVoice,
    ApplyRate,
    ApplyPitch,
    RestoreSettings,
    PersistSettings,
    TagStart,
    TagRegister,
    TagUnregister,
    LaunchTag,
    TagDecode,
    TagWrite,
    StopSpeech,
    Speak,
}

impl fmt::Display for ReaderStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::SpeechInit => "speech_init",
            Self::VoiceCatalog => "voice_catalog",
            Self::DeviceLanguage => "device_language",
            Self::DefaultLanguage => "default_language",
            Self::DefaultVoice => "default_voice",
            Self::ApplyRate => "apply_rate",
            Self::ApplyPitch => "apply_pitch",
            Self::RestoreSettings => "restore_settings",
            Self::PersistSettings => "persist_settings",
            Self::TagStart => "tag_start",
            Self::TagRegister => "tag_register",
            Self::TagUnregister => "tag_unregister",
            Self::LaunchTag => "launch_tag",
            Self::TagDecode => "tag_decode",
            Self::TagWrite => "tag_write",
            Self::StopSpeech => "stop_speech",
            Self::Speak => "speak",
        };
        f.write_str(label)
    }
}

/// Event published on the reader's diagnostic stream
#[derive(Debug, Clone, PartialEq)]
pub enum ReaderEvent {
    PhaseChanged(ReaderPhase),
    SessionStatusChanged(SessionStatus),
    TagRead(TagReadResult),
    SettingsOverlayOpened,
    /// A step failed and was skipped
    StepFailed {
        step: ReaderStep,
        kind: FailureKind,
        message: String,
    },
}

impl ReaderEvent {
    pub(crate) fn step_failed(step: ReaderStep, error: &ApplicationError) -> Self {
        Self::StepFailed {
            step,
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}
