//! Audio settings entity

use serde::{Deserialize, Serialize};

use crate::entities::VoiceDescriptor;
use crate::value_objects::{SpeechPitch, SpeechRate};

/// User adjustable speech settings persisted across launches
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AudioSettings {
    /// Speaking rate
    pub rate: SpeechRate,
    /// Pitch multiplier
    pub pitch: SpeechPitch,
    /// Selected voice, absent when the catalog offers none
    pub selected_voice_id: Option<String>,
}

impl AudioSettings {
    /// Builder: set the rate
    #[must_use]
    pub fn with_rate(mut self, rate: SpeechRate) -> Self {
        self.rate = rate;
        self
    }

    /// Builder: set the pitch
    #[must_use]
    pub fn with_pitch(mut self, pitch: SpeechPitch) -> Self {
        self.pitch = pitch;
        self
    }

    /// Builder: select a voice
    #[must_use]
    pub fn with_voice(mut self, voice_id: impl Into<String>) -> Self {
        self.selected_voice_id = Some(voice_id.into());
        self
    }

    /// Make the selected voice reference an entry of `catalog`
    ///
    /// A selection missing from the catalog is replaced by the first entry,
    /// or cleared when the catalog is empty. Returns the dropped id, if any.
    pub fn retain_voice_from(&mut self, catalog: &[VoiceDescriptor]) -> Option<String> {
        let stale = match &self.selected_voice_id {
            Some(id) if catalog.iter().any(|v| &v.id == id) => return None,
            Some(id) => Some(id.clone()),
            None => None,
        };
        self.selected_voice_id = catalog.first().map(|v| v.id.clone());
        stale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<VoiceDescriptor> {
        vec![
            VoiceDescriptor::new("v1", "Uno", "es-CL"),
            VoiceDescriptor::new("v3", "Tres", "es-ES"),
        ]
    }

    #[test]
    fn default_values() {
        let settings = AudioSettings::default();
        assert!((settings.rate.value() - 0.5).abs() < f32::EPSILON);
        assert!((settings.pitch.value() - 1.0).abs() < f32::EPSILON);
        assert!(settings.selected_voice_id.is_none());
    }

    #[test]
    fn known_voice_is_kept() {
        let mut settings = AudioSettings::default().with_voice("v3");
        assert_eq!(settings.retain_voice_from(&catalog()), None);
        assert_eq!(settings.selected_voice_id.as_deref(), Some("v3"));
    }

    #[test]
    fn stale_voice_falls_back_to_first_entry() {
        let mut settings = AudioSettings::default().with_voice("gone");
        assert_eq!(
            settings.retain_voice_from(&catalog()),
            Some("gone".to_string())
        );
        assert_eq!(settings.selected_voice_id.as_deref(), Some("v1"));
    }

    #[test]
    fn stale_voice_with_empty_catalog_is_cleared() {
        let mut settings = AudioSettings::default().with_voice("gone");
        settings.retain_voice_from(&[]);
        assert!(settings.selected_voice_id.is_none());
    }

    #[test]
    fn missing_voice_takes_first_entry() {
        let mut settings = AudioSettings::default();
        assert_eq!(settings.retain_voice_from(&catalog()), None);
        assert_eq!(settings.selected_voice_id.as_deref(), Some("v1"));
    }
}
