//! In-memory settings store

use std::collections::HashMap;

use application::{ApplicationError, SettingsStorePort};
use async_trait::async_trait;
use parking_lot::RwLock;

/// Settings store that keeps values for the lifetime of the process
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemorySettingsStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `entries`
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            values: RwLock::new(values),
        }
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    /// Whether nothing has been stored
    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

#[async_trait]
impl SettingsStorePort for InMemorySettingsStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ApplicationError> {
        Ok(self.values.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), ApplicationError> {
        self.values
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn set_many(&self, entries: &[(String, String)]) -> Result<(), ApplicationError> {
        let mut values = self.values.write();
        for (key, value) in entries {
            values.insert(key.clone(), value.clone());
        }
        Ok(())
    }
}
