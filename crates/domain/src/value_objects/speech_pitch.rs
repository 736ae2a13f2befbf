//! Speech pitch value object
//!
//! Represents a validated synthesizer pitch multiplier in the range 0.5-2.0.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

use crate::DomainError;

/// Error returned when a pitch is outside 0.5-2.0 or not a number
#[derive(Debug, Clone, Copy, Error, PartialEq)]
#[error("invalid speech pitch: {0} is out of range (must be 0.5-2.0)")]
pub struct InvalidSpeechPitch(f32);

/// Synthesizer pitch multiplier (0.5-2.0)
///
/// # Examples
///
/// ```
/// use domain::value_objects::SpeechPitch;
///
/// let pitch = SpeechPitch::new(1.25).expect("valid pitch");
/// assert_eq!(pitch.to_string(), "1.25");
/// assert!(SpeechPitch::new(0.1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct SpeechPitch(f32);

impl SpeechPitch {
    /// Lowest accepted pitch
    pub const MIN: f32 = 0.5;
    /// Highest accepted pitch
    pub const MAX: f32 = 2.0;
    /// Pitch used when nothing has been persisted yet
    pub const DEFAULT: f32 = 1.0;

    /// Create a new validated pitch
    ///
    /// # Errors
    ///
    /// Returns `InvalidSpeechPitch` if the value is NaN or outside 0.5-2.0.
    pub fn new(value: f32) -> Result<Self, InvalidSpeechPitch> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidSpeechPitch(value))
        }
    }

    /// Create a pitch, clamping to the valid range
    #[must_use]
    pub fn clamped(value: f32) -> Self {
        if value.is_nan() {
            Self::default()
        } else {
            Self(value.clamp(Self::MIN, Self::MAX))
        }
    }

    /// Get the pitch as a float
    #[must_use]
    pub const fn value(self) -> f32 {
        self.0
    }
}

impl Default for SpeechPitch {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for SpeechPitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SpeechPitch {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f32 = s
            .trim()
            .parse()
            .map_err(|e| DomainError::invalid_setting("speech pitch", format!("{s:?}: {e}")))?;
        Self::new(value).map_err(|e| DomainError::invalid_setting("speech pitch", e.to_string()))
    }
}

impl From<SpeechPitch> for f32 {
    fn from(pitch: SpeechPitch) -> Self {
        pitch.0
    }
}

impl<'de> Deserialize<'de> for SpeechPitch {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f32::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}
