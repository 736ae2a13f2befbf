//! Application layer - Use cases and orchestration
//!
//! Defines the ports to the speech, tag, settings and locale services and
//! the `ReaderService` that sequences them: startup, settings changes,
//! tag reads and read-aloud requests.

pub mod config;
pub mod error;
pub mod ports;
pub mod services;

pub use config::{PlatformCapabilities, ReaderConfig};
pub use error::{ApplicationError, FailureKind};
pub use ports::*;
pub use services::*;
