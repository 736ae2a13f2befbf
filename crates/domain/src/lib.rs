//! Domain layer for TagSpeak
//!
//! Contains the speech settings value objects, the voice and tag entities,
//! and domain errors. This layer has no knowledge of NFC or TTS platforms.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
