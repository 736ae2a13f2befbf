//! Domain entities - Voices, settings and tag reads

mod audio_settings;
mod radio_state;
mod session_status;
mod tag_read_result;
mod voice_descriptor;

pub use audio_settings::AudioSettings;
pub use radio_state::RadioState;
pub use session_status::{SessionStatus, SpeechEvent};
pub use tag_read_result::TagReadResult;
pub use voice_descriptor::VoiceDescriptor;
