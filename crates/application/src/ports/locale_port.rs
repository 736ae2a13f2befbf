//! Locale port - platform locale lookup

#[cfg(test)]
use mockall::automock;

/// Port for reading the device locale
#[cfg_attr(test, automock)]
pub trait LocalePort: Send + Sync {
    /// Platform locale identifier (e.g. "es_CL"), `None` when unavailable
    fn locale_identifier(&self) -> Option<String>;
}
