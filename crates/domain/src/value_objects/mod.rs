//! Value Objects - Immutable, identity-less domain primitives

mod language_code;
mod speech_pitch;
mod speech_rate;

pub use language_code::LanguageCode;
pub use speech_pitch::{InvalidSpeechPitch, SpeechPitch};
pub use speech_rate::{InvalidSpeechRate, SpeechRate};
