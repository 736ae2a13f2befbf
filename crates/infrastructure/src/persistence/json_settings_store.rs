//! Settings store backed by a JSON document on disk
//!
//! The whole document is rewritten on every change: it is serialized to a
//! sibling temporary file which is then renamed over the original, so a
//! crash mid-write leaves the previous document intact.

use std::{
    collections::BTreeMap,
    ffi::OsString,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use application::{ApplicationError, SettingsStorePort};
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::error::{map_io_error, map_json_error};

type Document = BTreeMap<String, String>;

/// JSON-file implementation of [`SettingsStorePort`]
#[derive(Debug)]
pub struct JsonFileSettingsStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileSettingsStore {
    /// Store persisting to `path`; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Settings file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map_or_else(|| OsString::from("settings"), OsString::from);
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Raw document bytes; `None` when the file is missing or blank
    async fn read_bytes(&self) -> Result<Option<Vec<u8>>, ApplicationError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(None),
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(map_io_error(&self.path, &e)),
        }
    }

    fn parse_document(&self, bytes: &[u8]) -> Result<Document, ApplicationError> {
        serde_json::from_slice(bytes).map_err(|e| map_json_error(&self.path, &e))
    }

    async fn read_document(&self) -> Result<Document, ApplicationError> {
        match self.read_bytes().await? {
            Some(bytes) => self.parse_document(&bytes),
            None => Ok(Document::new()),
        }
    }

    async fn write_document(&self, document: &Document) -> Result<(), ApplicationError> {
        let bytes =
            serde_json::to_vec_pretty(document).map_err(|e| map_json_error(&self.path, &e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| map_io_error(parent, &e))?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, &bytes)
            .await
            .map_err(|e| map_io_error(&temp, &e))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| map_io_error(&self.path, &e))
    }

    /// Apply `entries` to the current document and write it back
    ///
    /// A document that is not valid JSON is replaced rather than blocking
    /// every future write. A file that cannot be read fails the update.
    async fn update(&self, entries: &[(String, String)]) -> Result<(), ApplicationError> {
        let _guard = self.write_lock.lock().await;
        let mut document = match self.read_bytes().await? {
            Some(bytes) => self.parse_document(&bytes).unwrap_or_else(|e| {
                warn!(error = %e, "Discarding corrupt settings document");
                Document::new()
            }),
            None => Document::new(),
        };
        for (key, value) in entries {
            document.insert(key.clone(), value.clone());
        }
        self.write_document(&document).await?;
        debug!(count = entries.len(), path = %self.path.display(), "Settings written");
        Ok(())
    }
}

#[async_trait]
impl SettingsStorePort for JsonFileSettingsStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>, ApplicationError> {
        let document = self.read_document().await?;
        Ok(document.get(key).cloned())
    }

    #[instrument(skip(self))]
    async fn set(&self, key: &str, value: &str) -> Result<(), ApplicationError> {
        self.update(&[(key.to_string(), value.to_string())]).await
    }

    #[instrument(skip(self, entries), fields(count = entries.len()))]
    async fn set_many(&self, entries: &[(String, String)]) -> Result<(), ApplicationError> {
        self.update(entries).await
    }
}
