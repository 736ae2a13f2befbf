//! Console adapters for running the reader without NFC or TTS hardware
//!
//! `ConsoleSpeech` prints utterances instead of playing them, and
//! `ReplayTags` hands a single pre-recorded NDEF message to the reader as the
//! launching tag.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use application::{
    ApplicationError, CatalogVoice, RadioStateListener, SpeechEventListener, SpeechPort,
    Subscription, TagListener, TagPort,
};
use async_trait::async_trait;
use domain::{SpeechEvent, SpeechPitch, SpeechRate};
use parking_lot::Mutex;
use tracing::info;

type Listeners = Arc<Mutex<Vec<(u64, SpeechEventListener)>>>;

/// Speech engine that writes utterances to the log
pub struct ConsoleSpeech {
    catalog: Vec<CatalogVoice>,
    listeners: Listeners,
    next_listener: AtomicU64,
    spoken: Mutex<Vec<String>>,
}

impl fmt::Debug for ConsoleSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleSpeech")
            .field("voices", &self.catalog.len())
            .field("listeners", &self.listeners.lock().len())
            .finish_non_exhaustive()
    }
}

impl ConsoleSpeech {
    pub fn new(catalog: Vec<CatalogVoice>) -> Self {
        Self {
            catalog,
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_listener: AtomicU64::new(0),
            spoken: Mutex::new(Vec::new()),
        }
    }

    /// Every utterance so far
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().clone()
    }

    fn emit(&self, event: SpeechEvent) {
        let listeners: Vec<SpeechEventListener> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(event);
        }
    }
}

#[async_trait]
impl SpeechPort for ConsoleSpeech {
    async fn init_status(&self) -> Result<(), ApplicationError> {
        Ok(())
    }

    async fn voices(&self) -> Result<Vec<CatalogVoice>, ApplicationError> {
        Ok(self.catalog.clone())
    }

    async fn set_default_language(&self, language_tag: &str) -> Result<(), ApplicationError> {
        info!(language = language_tag, "Speech language");
        Ok(())
    }

    async fn set_default_voice(&self, voice_id: &str) -> Result<(), ApplicationError> {
        if self.catalog.iter().any(|voice| voice.id == voice_id) {
            info!(voice = voice_id, "Speech voice");
            Ok(())
        } else {
            Err(ApplicationError::ExternalService(format!(
                "unknown voice {voice_id}"
            )))
        }
    }

    async fn set_default_rate(&self, rate: SpeechRate) -> Result<(), ApplicationError> {
        info!(%rate, "Speech rate");
        Ok(())
    }

    async fn set_default_pitch(&self, pitch: SpeechPitch) -> Result<(), ApplicationError> {
        info!(%pitch, "Speech pitch");
        Ok(())
    }

    async fn speak(&self, text: &str) -> Result<(), ApplicationError> {
        self.emit(SpeechEvent::Start);
        info!(text, "Speaking");
        self.spoken.lock().push(text.to_string());
        self.emit(SpeechEvent::Finish);
        Ok(())
    }

    async fn stop(&self) -> Result<(), ApplicationError> {
        Ok(())
    }

    fn add_event_listener(&self, listener: SpeechEventListener) -> Subscription {
        let id = self.next_listener.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().push((id, listener));
        let listeners = Arc::clone(&self.listeners);
        Subscription::new(move || listeners.lock().retain(|(entry, _)| *entry != id))
    }
}

/// Tag reader that replays one launching tag
#[derive(Debug, Default)]
pub struct ReplayTags {
    launch_tag: Mutex<Option<Vec<u8>>>,
    written: Mutex<Vec<Vec<u8>>>,
}

impl ReplayTags {
    pub fn new(launch_tag: Option<Vec<u8>>) -> Self {
        Self {
            launch_tag: Mutex::new(launch_tag),
            written: Mutex::new(Vec::new()),
        }
    }

    /// Messages handed to `write_ndef`
    pub fn written(&self) -> Vec<Vec<u8>> {
        self.written.lock().clone()
    }
}

#[async_trait]
impl TagPort for ReplayTags {
    async fn is_supported(&self) -> bool {
        true
    }

    async fn start(&self) -> Result<(), ApplicationError> {
        Ok(())
    }

    async fn register_tag_discovery(
        &self,
        _listener: TagListener,
    ) -> Result<Subscription, ApplicationError> {
        Ok(Subscription::detached())
    }

    async fn unregister_tag_discovery(&self) -> Result<(), ApplicationError> {
        Ok(())
    }

    async fn read_launch_tag(&self) -> Result<Option<Vec<u8>>, ApplicationError> {
        Ok(self.launch_tag.lock().take())
    }

    async fn write_ndef(&self, message: Vec<u8>) -> Result<(), ApplicationError> {
        info!(bytes = message.len(), "Tag written");
        self.written.lock().push(message);
        Ok(())
    }

    fn on_radio_state_change(&self, _listener: RadioStateListener) -> Subscription {
        Subscription::detached()
    }
}
