//! Application services - Use case implementations

mod gesture_gate;
mod reader_service;
pub mod voice_selection;

pub use gesture_gate::GestureGate;
pub use reader_service::{
    AppState, ReaderEvent, ReaderPhase, ReaderPorts, ReaderService, ReaderStep, TagReadCycle,
};
pub use voice_selection::{device_language, offline_voices, select_voices};
