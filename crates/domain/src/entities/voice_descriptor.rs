//! Voice descriptor entity

use serde::{Deserialize, Serialize};

/// A synthesizer voice usable for the device language
///
/// Immutable once taken from the speech service catalog for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceDescriptor {
    /// Opaque voice identifier understood by the speech service
    pub id: String,
    /// Human readable name, may be empty on some platforms
    pub display_name: String,
    /// BCP-47 style language tag (e.g. "es-CL")
    pub language_tag: String,
}

impl VoiceDescriptor {
    /// Create a new voice descriptor
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        language_tag: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            language_tag: language_tag.into(),
        }
    }

    /// List label in the form "es-CL - Name", using the id when unnamed
    #[must_use]
    pub fn label(&self) -> String {
        let name = if self.display_name.is_empty() {
            &self.id
        } else {
            &self.display_name
        };
        format!("{} - {}", self.language_tag, name)
    }
}
