//! Tag port - Interface to the platform NFC stack

use std::sync::Arc;

use async_trait::async_trait;
use domain::RadioState;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;
use crate::ports::Subscription;

/// Callback receiving the raw NDEF message of a discovered tag
pub type TagListener = Arc<dyn Fn(Vec<u8>) + Send + Sync>;

/// Callback receiving NFC radio state changes
pub type RadioStateListener = Arc<dyn Fn(RadioState) + Send + Sync>;

/// Port for NFC tag detection and writing
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TagPort: Send + Sync {
    /// Whether the device has NFC hardware
    async fn is_supported(&self) -> bool;

    /// Start the NFC manager
    async fn start(&self) -> Result<(), ApplicationError>;

    /// Begin listening for tags
    ///
    /// Some platforms deliver a single discovery per registration.
    async fn register_tag_discovery(
        &self,
        listener: TagListener,
    ) -> Result<Subscription, ApplicationError>;

    /// Stop listening for tags and close any system tag sheet
    async fn unregister_tag_discovery(&self) -> Result<(), ApplicationError>;

    /// Message of the tag that launched the application, if any
    async fn read_launch_tag(&self) -> Result<Option<Vec<u8>>, ApplicationError>;

    /// Write an NDEF message to the tag in range
    async fn write_ndef(&self, message: Vec<u8>) -> Result<(), ApplicationError>;

    /// Register for radio state changes
    fn on_radio_state_change(&self, listener: RadioStateListener) -> Subscription;
}
