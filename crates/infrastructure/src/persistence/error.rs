//! Shared error mapping for the file-backed stores

use std::path::Path;

use application::ApplicationError;

/// Map an I/O failure on `path` to an application-layer error
pub fn map_io_error(path: &Path, e: &std::io::Error) -> ApplicationError {
    ApplicationError::Persistence(format!("{}: {e}", path.display()))
}

/// Map a (de)serialization failure on `path` to an application-layer error
pub fn map_json_error(path: &Path, e: &serde_json::Error) -> ApplicationError {
    ApplicationError::Persistence(format!("{}: malformed settings document: {e}", path.display()))
}
