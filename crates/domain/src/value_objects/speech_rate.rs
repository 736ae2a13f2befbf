//! Speech rate value object
//!
//! Represents a validated synthesizer speaking rate in the range 0.01-0.99,
//! where 0.5 is the platform's normal speed.
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::SpeechRate;
//!
//! let rate = SpeechRate::new(0.42).expect("valid rate");
//! assert!((rate.value() - 0.42).abs() < f32::EPSILON);
//!
//! // Out-of-range values are rejected
//! assert!(SpeechRate::new(1.5).is_err());
//!
//! // Persisted strings parse back into a rate
//! let restored: SpeechRate = "0.42".parse().expect("parses");
//! assert_eq!(restored, rate);
//! ```

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

use crate::DomainError;

/// Error returned when a speech rate is outside 0.01-0.99 or not a number
#[derive(Debug, Clone, Copy, Error, PartialEq)]
#[error("invalid speech rate: {0} is out of range (must be 0.01-0.99)")]
pub struct InvalidSpeechRate(f32);

/// Synthesizer speaking rate (0.01-0.99)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct SpeechRate(f32);

impl SpeechRate {
    /// Slowest accepted rate
    pub const MIN: f32 = 0.01;
    /// Fastest accepted rate
    pub const MAX: f32 = 0.99;
    /// Rate used when nothing has been persisted yet
    pub const DEFAULT: f32 = 0.5;

    /// Create a new validated speech rate
    ///
    /// # Errors
    ///
    /// Returns `InvalidSpeechRate` if the value is NaN or outside 0.01-0.99.
    pub fn new(value: f32) -> Result<Self, InvalidSpeechRate> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidSpeechRate(value))
        }
    }

    /// Create a speech rate, clamping to the valid range
    ///
    /// NaN falls back to the default rate.
    #[must_use]
    pub fn clamped(value: f32) -> Self {
        if value.is_nan() {
            Self::default()
        } else {
            Self(value.clamp(Self::MIN, Self::MAX))
        }
    }

    /// Get the rate as a float
    #[must_use]
    pub const fn value(self) -> f32 {
        self.0
    }
}

impl Default for SpeechRate {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for SpeechRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SpeechRate {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f32 = s
            .trim()
            .parse()
            .map_err(|e| DomainError::invalid_setting("speech rate", format!("{s:?}: {e}")))?;
        Self::new(value).map_err(|e| DomainError::invalid_setting("speech rate", e.to_string()))
    }
}

impl TryFrom<f32> for SpeechRate {
    type Error = InvalidSpeechRate;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SpeechRate> for f32 {
    fn from(rate: SpeechRate) -> Self {
        rate.0
    }
}

/// Custom deserialization that validates the rate
impl<'de> Deserialize<'de> for SpeechRate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f32::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}
