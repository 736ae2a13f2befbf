//! Logging initialisation
//!
//! Installs a `tracing-subscriber` registry for the whole process.

mod logging;

pub use logging::{TelemetryConfig, TelemetryError, init_telemetry};
