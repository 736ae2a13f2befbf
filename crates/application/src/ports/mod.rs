//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! the platform. Adapters implement them for a concrete device or for tests.

mod locale_port;
mod settings_store;
mod speech_port;
mod subscription;
mod tag_port;

#[cfg(test)]
pub use locale_port::MockLocalePort;
pub use locale_port::LocalePort;
#[cfg(test)]
pub use settings_store::MockSettingsStorePort;
pub use settings_store::{SettingsStorePort, keys};
#[cfg(test)]
pub use speech_port::MockSpeechPort;
pub use speech_port::{CatalogVoice, SpeechEventListener, SpeechPort};
pub use subscription::Subscription;
#[cfg(test)]
pub use tag_port::MockTagPort;
pub use tag_port::{RadioStateListener, TagListener, TagPort};
