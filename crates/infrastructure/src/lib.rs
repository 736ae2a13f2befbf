//! Infrastructure layer - Adapters for external systems
//!
//! Implements the settings-store and locale ports defined in the application
//! layer, loads the application configuration and installs logging.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::{
    EnvLocaleProvider, InMemorySettingsStore, StaticLocaleProvider, locale_provider,
    settings_store,
};
pub use config::{AppConfig, Environment, ReaderAppConfig, StorageBackend, StorageConfig};
pub use persistence::JsonFileSettingsStore;
pub use telemetry::{TelemetryConfig, TelemetryError, init_telemetry};
