//! Application configuration
//!
//! Loaded in layers: serde defaults, then an optional `tagspeak.toml`, then
//! environment variables such as `TAGSPEAK_READER__FALLBACK_LOCALE=en`.

use std::{path::PathBuf, time::Duration};

use application::{ApplicationError, PlatformCapabilities, ReaderConfig};
use domain::LanguageCode;
use serde::{Deserialize, Serialize};

use crate::telemetry::TelemetryConfig;

/// Prefix of the environment variables read by [`AppConfig::load`]
pub const ENV_PREFIX: &str = "TAGSPEAK";

/// Base name of the optional configuration file
pub const CONFIG_FILE: &str = "tagspeak";

/// Application environment (development or production)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Human-readable logs
    #[default]
    Development,
    /// JSON logs regardless of the telemetry section
    Production,
}

/// Reader orchestration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderAppConfig {
    /// Platform tag-session behaviour
    #[serde(default)]
    pub capabilities: PlatformCapabilities,

    /// Pause between closing the tag sheet and speaking, in milliseconds
    #[serde(default = "default_dismiss_delay_ms")]
    pub tag_ui_dismiss_delay_ms: u64,

    /// Activations that open the settings overlay
    #[serde(default = "default_gesture_taps")]
    pub settings_gesture_taps: u32,

    /// Gesture window in milliseconds
    #[serde(default = "default_gesture_window_ms")]
    pub settings_gesture_window_ms: u64,

    /// Locale used when the platform reports none
    #[serde(default = "default_fallback_locale")]
    pub fallback_locale: String,

    /// Fixed locale; when set the environment is not consulted
    #[serde(default)]
    pub locale: Option<String>,

    /// Text shown before the first tag is read
    #[serde(default)]
    pub initial_text: Option<String>,
}

const fn default_dismiss_delay_ms() -> u64 {
    1000
}

const fn default_gesture_taps() -> u32 {
    2
}

const fn default_gesture_window_ms() -> u64 {
    500
}

fn default_fallback_locale() -> String {
    "es".to_string()
}

impl Default for ReaderAppConfig {
    fn default() -> Self {
        Self {
            capabilities: PlatformCapabilities::default(),
            tag_ui_dismiss_delay_ms: default_dismiss_delay_ms(),
            settings_gesture_taps: default_gesture_taps(),
            settings_gesture_window_ms: default_gesture_window_ms(),
            fallback_locale: default_fallback_locale(),
            locale: None,
            initial_text: None,
        }
    }
}

impl ReaderAppConfig {
    /// Convert into the orchestrator's configuration
    #[must_use]
    pub fn to_reader_config(&self) -> ReaderConfig {
        let defaults = ReaderConfig::default();
        ReaderConfig {
            capabilities: self.capabilities,
            tag_ui_dismiss_delay: Duration::from_millis(self.tag_ui_dismiss_delay_ms),
            settings_gesture_taps: self.settings_gesture_taps,
            settings_gesture_window: Duration::from_millis(self.settings_gesture_window_ms),
            fallback_locale: self.fallback_locale.clone(),
            initial_text: self.initial_text.clone().unwrap_or(defaults.initial_text),
        }
    }

    /// Reject values the orchestrator cannot work with
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` naming the offending field.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.settings_gesture_taps == 0 {
            return Err(ApplicationError::Configuration(
                "reader.settings_gesture_taps must be at least 1".into(),
            ));
        }
        if self.settings_gesture_window_ms == 0 {
            return Err(ApplicationError::Configuration(
                "reader.settings_gesture_window_ms must be positive".into(),
            ));
        }
        LanguageCode::from_locale(&self.fallback_locale).map_err(|e| {
            ApplicationError::Configuration(format!("reader.fallback_locale: {e}"))
        })?;
        if let Some(locale) = &self.locale {
            LanguageCode::from_locale(locale)
                .map_err(|e| ApplicationError::Configuration(format!("reader.locale: {e}")))?;
        }
        Ok(())
    }
}

/// Where persisted settings live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Lost when the process exits
    Memory,
    /// JSON document on disk
    #[default]
    File,
}

/// Settings-store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Store implementation
    #[serde(default)]
    pub backend: StorageBackend,

    /// Settings file used by the `file` backend
    #[serde(default = "default_settings_path")]
    pub path: PathBuf,
}

fn default_settings_path() -> PathBuf {
    PathBuf::from("tagspeak-settings.json")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_settings_path(),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment
    #[serde(default)]
    pub environment: Option<Environment>,

    /// Reader orchestration
    #[serde(default)]
    pub reader: ReaderAppConfig,

    /// Settings persistence
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from the optional file and the environment
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` when a source is malformed or a value has the
    /// wrong type.
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(Self::environment_source())
            .build()?
            .try_deserialize()
    }

    /// Parse a TOML document, then apply environment overrides
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` when the document is not valid TOML or does
    /// not match the configuration shape.
    pub fn from_toml(document: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(document, config::FileFormat::Toml))
            .add_source(Self::environment_source())
            .build()?
            .try_deserialize()
    }

    fn environment_source() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    /// Effective environment
    #[must_use]
    pub fn environment(&self) -> Environment {
        self.environment.unwrap_or_default()
    }

    /// Telemetry settings with production forcing JSON output
    #[must_use]
    pub fn effective_telemetry(&self) -> TelemetryConfig {
        let mut telemetry = self.telemetry.clone();
        if self.environment() == Environment::Production {
            telemetry.json = true;
        }
        telemetry
    }

    /// Orchestrator configuration
    #[must_use]
    pub fn reader_config(&self) -> ReaderConfig {
        self.reader.to_reader_config()
    }
}
