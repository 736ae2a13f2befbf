//! Tag detection lifecycle and tag writes

use std::sync::Arc;

use domain::TagReadResult;
use nfc_ndef::{decode_first_text, encode_text_message, text::DEFAULT_LANGUAGE};
use tokio::runtime::Handle;
use tracing::{debug, info, instrument, warn};

use super::{ReaderEvent, ReaderPhase, ReaderService, ReaderStep, TagReadCycle};
use crate::error::ApplicationError;
use crate::ports::TagListener;

impl ReaderService {
    /// Register for tag discovery
    ///
    /// Returns `false` when NFC is unavailable or registration failed. A
    /// previous registration is replaced. Discoveries are handled on the
    /// Tokio runtime this is polled from; outside a runtime registration
    /// fails.
    pub async fn start_tag_detection(self: &Arc<Self>) -> bool {
        if !self.state.read().nfc_supported {
            debug!("Tag detection requested without NFC support");
            return false;
        }

        let Some(runtime) = self.settle(
            ReaderStep::TagRegister,
            Handle::try_current().map_err(|e| ApplicationError::ExternalService(e.to_string())),
        ) else {
            return false;
        };

        let service = Arc::downgrade(self);
        let listener: TagListener = Arc::new(move |message: Vec<u8>| {
            let service = service.clone();
            runtime.spawn(async move {
                if let Some(service) = service.upgrade() {
                    service.tag_discovered(message).await;
                }
            });
        });

        let Some(subscription) = self.settle(
            ReaderStep::TagRegister,
            self.tags.register_tag_discovery(listener).await,
        ) else {
            return false;
        };

        let previous = self.tag_session.lock().replace(subscription);
        drop(previous);
        self.set_tag_cycle(TagReadCycle::Detecting);
        self.transition(ReaderPhase::Listening);
        true
    }

    /// Unregister tag discovery, if registered
    pub async fn stop_tag_detection(&self) {
        let Some(subscription) = self.tag_session.lock().take() else {
            return;
        };
        subscription.dispose();
        self.settle(
            ReaderStep::TagUnregister,
            self.tags.unregister_tag_discovery().await,
        );

        let listening = {
            let mut state = self.state.write();
            state.tag_cycle = TagReadCycle::Idle;
            state.phase == ReaderPhase::Listening
        };
        if listening {
            self.transition(ReaderPhase::Configured);
        }
    }

    /// Handle a discovered tag: decode, store the text and read it aloud
    ///
    /// A tag without a decodable text record leaves the current text alone.
    /// On modal platforms the tag session is closed either way.
    #[instrument(skip(self, message), fields(bytes = message.len()))]
    pub async fn tag_discovered(&self, message: Vec<u8>) -> TagReadResult {
        self.set_tag_cycle(TagReadCycle::Discovered);

        let decoded = self.settle(
            ReaderStep::TagDecode,
            decode_first_text(&message).map_err(ApplicationError::from),
        );
        let result = TagReadResult::new(message, decoded);
        self.emit(ReaderEvent::TagRead(result.clone()));

        let modal = self.config.capabilities.requires_tag_ui_dismiss_delay;
        let Some(text) = result.text().map(str::to_owned) else {
            info!("Tag carried no text");
            if modal {
                self.stop_tag_detection().await;
            }
            self.set_tag_cycle(TagReadCycle::Idle);
            return result;
        };

        {
            let mut state = self.state.write();
            state.text = text;
            state.last_tag = Some(result.clone());
        }

        if modal {
            self.stop_tag_detection().await;
            tokio::time::sleep(self.config.tag_ui_dismiss_delay).await;
        }

        self.set_tag_cycle(TagReadCycle::Speaking);
        self.read_aloud().await;
        self.set_tag_cycle(TagReadCycle::Idle);
        result
    }

    /// Write the current text to the tag in range as a single text record
    ///
    /// # Errors
    ///
    /// Returns `CapabilityAbsent` without NFC, or the encode/write failure.
    /// Failures are also published on the event stream.
    pub async fn write_current_text(&self) -> Result<(), ApplicationError> {
        let (supported, text) = {
            let state = self.state.read();
            (state.nfc_supported, state.text.clone())
        };

        let result = if supported {
            match encode_text_message(&text, DEFAULT_LANGUAGE) {
                Ok(message) => self.tags.write_ndef(message).await,
                Err(e) => Err(e.into()),
            }
        } else {
            Err(ApplicationError::CapabilityAbsent("NFC".into()))
        };

        if let Err(error) = &result {
            self.emit(ReaderEvent::step_failed(ReaderStep::TagWrite, error));
            warn!(error = %error, "Tag write failed");
        }
        result
    }
}
