//! Speech session status and the lifecycle events that drive it

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle event emitted by the speech service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeechEvent {
    /// An utterance started playing
    Start,
    /// An utterance played to the end
    Finish,
    /// An utterance was stopped before the end
    Cancel,
}

impl SpeechEvent {
    /// Platform event name (`tts-start`, `tts-finish`, `tts-cancel`)
    #[must_use]
    pub const fn event_name(self) -> &'static str {
        match self {
            Self::Start => "tts-start",
            Self::Finish => "tts-finish",
            Self::Cancel => "tts-cancel",
        }
    }

    /// Resolve a platform event name
    #[must_use]
    pub fn from_event_name(name: &str) -> Option<Self> {
        match name {
            "tts-start" => Some(Self::Start),
            "tts-finish" => Some(Self::Finish),
            "tts-cancel" => Some(Self::Cancel),
            _ => None,
        }
    }

    /// Session status this event moves to
    #[must_use]
    pub const fn status(self) -> SessionStatus {
        match self {
            Self::Start => SessionStatus::Speaking,
            Self::Finish => SessionStatus::Finished,
            Self::Cancel => SessionStatus::Cancelled,
        }
    }
}

/// Display-only status of the speech session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Speech service not ready yet
    #[default]
    Initializing,
    /// Voices loaded, nothing spoken yet
    Initialized,
    /// An utterance is playing
    Speaking,
    /// Last utterance was stopped
    Cancelled,
    /// Last utterance finished
    Finished,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Initializing => "initializing",
            Self::Initialized => "initialized",
            Self::Speaking => "speaking",
            Self::Cancelled => "cancelled",
            Self::Finished => "finished",
        };
        f.write_str(label)
    }
}
