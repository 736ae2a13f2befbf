//! Adapters implementing application ports

mod locale_adapter;
mod memory_settings_store;

use std::sync::Arc;

use application::{LocalePort, SettingsStorePort};
use tracing::info;

pub use locale_adapter::{EnvLocaleProvider, StaticLocaleProvider};
pub use memory_settings_store::InMemorySettingsStore;

use crate::{
    config::{ReaderAppConfig, StorageBackend, StorageConfig},
    persistence::JsonFileSettingsStore,
};

/// Settings store selected by the storage section
pub fn settings_store(config: &StorageConfig) -> Arc<dyn SettingsStorePort> {
    match config.backend {
        StorageBackend::Memory => {
            info!("Using in-memory settings store");
            Arc::new(InMemorySettingsStore::new())
        },
        StorageBackend::File => {
            info!(path = %config.path.display(), "Using JSON settings file");
            Arc::new(JsonFileSettingsStore::new(config.path.clone()))
        },
    }
}

/// Locale provider: the configured fixed locale, else the process environment
pub fn locale_provider(config: &ReaderAppConfig) -> Arc<dyn LocalePort> {
    match &config.locale {
        Some(locale) => Arc::new(StaticLocaleProvider::new(Some(locale.clone()))),
        None => Arc::new(EnvLocaleProvider::new()),
    }
}
