//! Reader configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What the platform requires around tag sessions
///
/// Replaces branching on an OS name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformCapabilities {
    /// Tag discovery must be registered at startup; there is no launch-tag hook
    pub requires_explicit_tag_session_start: bool,
    /// A system tag-reading sheet must be closed before speech can start
    pub requires_tag_ui_dismiss_delay: bool,
}

impl PlatformCapabilities {
    /// Platform that delivers the launching tag and keeps discovery silent
    pub const fn launch_tag_hook() -> Self {
        Self {
            requires_explicit_tag_session_start: false,
            requires_tag_ui_dismiss_delay: false,
        }
    }

    /// Platform with a modal tag-reading sheet that is opened per session
    pub const fn modal_tag_session() -> Self {
        Self {
            requires_explicit_tag_session_start: true,
            requires_tag_ui_dismiss_delay: true,
        }
    }
}

impl Default for PlatformCapabilities {
    fn default() -> Self {
        Self {
            requires_explicit_tag_session_start: true,
            requires_tag_ui_dismiss_delay: false,
        }
    }
}

/// Configuration for the reader orchestration
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Platform tag-session behaviour
    pub capabilities: PlatformCapabilities,
    /// Wait between closing the tag sheet and speaking
    pub tag_ui_dismiss_delay: Duration,
    /// Activations needed to open the settings overlay
    pub settings_gesture_taps: u32,
    /// Window in which those activations must happen
    pub settings_gesture_window: Duration,
    /// Locale used when the platform does not report one
    pub fallback_locale: String,
    /// Text shown (and spoken) before any tag has been read
    pub initial_text: String,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            capabilities: PlatformCapabilities::default(),
            tag_ui_dismiss_delay: Duration::from_millis(1000),
            settings_gesture_taps: 2,
            settings_gesture_window: Duration::from_millis(500),
            fallback_locale: "es".to_string(),
            initial_text: "Esto es un texto de ejemplo. Lo logré".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reader_config_default() {
        let config = ReaderConfig::default();
        assert_eq!(config.settings_gesture_taps, 2);
        assert_eq!(config.settings_gesture_window, Duration::from_millis(500));
        assert_eq!(config.fallback_locale, "es");
        assert!(config.capabilities.requires_explicit_tag_session_start);
        assert!(!config.capabilities.requires_tag_ui_dismiss_delay);
    }

    #[test]
    fn capability_presets() {
        let hook = PlatformCapabilities::launch_tag_hook();
        assert!(!hook.requires_explicit_tag_session_start);
        let modal = PlatformCapabilities::modal_tag_session();
        assert!(modal.requires_explicit_tag_session_start && modal.requires_tag_ui_dismiss_delay);
    }
}
