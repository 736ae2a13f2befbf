//! NFC radio state reported by the tag service

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::DomainError;

/// State of the device NFC radio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadioState {
    On,
    Off,
    TurningOn,
    TurningOff,
}

impl RadioState {
    /// Whether tags can currently be read
    #[must_use]
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl fmt::Display for RadioState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::On => "on",
            Self::Off => "off",
            Self::TurningOn => "turning_on",
            Self::TurningOff => "turning_off",
        };
        f.write_str(label)
    }
}

impl FromStr for RadioState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            "turning_on" => Ok(Self::TurningOn),
            "turning_off" => Ok(Self::TurningOff),
            other => Err(DomainError::UnknownRadioState(other.to_string())),
        }
    }
}
