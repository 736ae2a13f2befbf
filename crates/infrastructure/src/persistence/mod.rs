//! Durable settings storage

mod error;
mod json_settings_store;

pub use json_settings_store::JsonFileSettingsStore;
