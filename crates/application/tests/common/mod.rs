//! In-memory fakes of the platform ports for scenario tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use application::{
    ApplicationError, CatalogVoice, LocalePort, RadioStateListener, ReaderConfig, ReaderPorts,
    ReaderService, SettingsStorePort, SpeechEventListener, SpeechPort, Subscription, TagListener,
    TagPort,
};
use async_trait::async_trait;
use domain::{RadioState, SpeechEvent, SpeechPitch, SpeechRate};
use parking_lot::Mutex;

/// Speech engine recording every call in order
#[derive(Default)]
pub struct RecordingSpeech {
    pub calls: Mutex<Vec<String>>,
    pub catalog: Vec<CatalogVoice>,
    pub reject_language: bool,
    pub listener: Mutex<Option<SpeechEventListener>>,
    pub speaking: Mutex<usize>,
    pub max_concurrent: Mutex<usize>,
}

impl RecordingSpeech {
    pub fn with_catalog(catalog: Vec<CatalogVoice>) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().push(call.into());
    }

    fn fire(&self, event: SpeechEvent) {
        let listener = self.listener.lock().clone();
        if let Some(listener) = listener {
            listener(event);
        }
    }
}

#[async_trait]
impl SpeechPort for RecordingSpeech {
    async fn init_status(&self) -> Result<(), ApplicationError> {
        self.record("init");
        Ok(())
    }

    async fn voices(&self) -> Result<Vec<CatalogVoice>, ApplicationError> {
        self.record("voices");
        Ok(self.catalog.clone())
    }

    async fn set_default_language(&self, language_tag: &str) -> Result<(), ApplicationError> {
        self.record(format!("language:{language_tag}"));
        if self.reject_language {
            return Err(ApplicationError::UnsupportedOperation(
                "Language is not supported".into(),
            ));
        }
        Ok(())
    }

    async fn set_default_voice(&self, voice_id: &str) -> Result<(), ApplicationError> {
        self.record(format!("voice:{voice_id}"));
        Ok(())
    }

    async fn set_default_rate(&self, rate: SpeechRate) -> Result<(), ApplicationError> {
        self.record(format!("rate:{rate}"));
        Ok(())
    }

    async fn set_default_pitch(&self, pitch: SpeechPitch) -> Result<(), ApplicationError> {
        self.record(format!("pitch:{pitch}"));
        Ok(())
    }

    async fn speak(&self, text: &str) -> Result<(), ApplicationError> {
        self.record(format!("speak:{text}"));
        let active = {
            let mut speaking = self.speaking.lock();
            *speaking += 1;
            *speaking
        };
        let mut max = self.max_concurrent.lock();
        *max = (*max).max(active);
        drop(max);
        self.fire(SpeechEvent::Start);
        Ok(())
    }

    async fn stop(&self) -> Result<(), ApplicationError> {
        self.record("stop");
        let was_speaking = {
            let mut speaking = self.speaking.lock();
            let was = *speaking > 0;
            *speaking = 0;
            was
        };
        if was_speaking {
            self.fire(SpeechEvent::Cancel);
        }
        Ok(())
    }

    fn add_event_listener(&self, listener: SpeechEventListener) -> Subscription {
        *self.listener.lock() = Some(listener);
        Subscription::detached()
    }
}

/// Key-value store kept across simulated restarts
#[derive(Default)]
pub struct MemoryStore {
    pub values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn with(entries: &[(&str, &str)]) -> Self {
        let values = entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Self {
            values: Mutex::new(values),
        }
    }
}

#[async_trait]
impl SettingsStorePort for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ApplicationError> {
        Ok(self.values.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), ApplicationError> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn set_many(&self, entries: &[(String, String)]) -> Result<(), ApplicationError> {
        let mut values = self.values.lock();
        for (key, value) in entries {
            values.insert(key.clone(), value.clone());
        }
        Ok(())
    }
}

/// Tag stack that hands discoveries to the registered listener
#[derive(Default)]
pub struct FakeTags {
    pub supported: bool,
    pub launch_tag: Option<Vec<u8>>,
    pub written: Mutex<Vec<Vec<u8>>>,
    pub listener: Mutex<Option<TagListener>>,
    pub radio: Mutex<Option<RadioStateListener>>,
}

impl FakeTags {
    pub fn supported() -> Self {
        Self {
            supported: true,
            ..Self::default()
        }
    }

    /// Simulate a tag entering the field; `false` if nobody listens
    pub fn present(&self, message: Vec<u8>) -> bool {
        let listener = self.listener.lock().clone();
        listener.map(|listener| listener(message)).is_some()
    }

    pub fn switch_radio(&self, state: RadioState) {
        let listener = self.radio.lock().clone();
        if let Some(listener) = listener {
            listener(state);
        }
    }
}

#[async_trait]
impl TagPort for FakeTags {
    async fn is_supported(&self) -> bool {
        self.supported
    }

    async fn start(&self) -> Result<(), ApplicationError> {
        Ok(())
    }

    async fn register_tag_discovery(
        &self,
        listener: TagListener,
    ) -> Result<Subscription, ApplicationError> {
        *self.listener.lock() = Some(listener);
        Ok(Subscription::detached())
    }

    async fn unregister_tag_discovery(&self) -> Result<(), ApplicationError> {
        *self.listener.lock() = None;
        Ok(())
    }

    async fn read_launch_tag(&self) -> Result<Option<Vec<u8>>, ApplicationError> {
        Ok(self.launch_tag.clone())
    }

    async fn write_ndef(&self, message: Vec<u8>) -> Result<(), ApplicationError> {
        self.written.lock().push(message);
        Ok(())
    }

    fn on_radio_state_change(&self, listener: RadioStateListener) -> Subscription {
        *self.radio.lock() = Some(listener);
        Subscription::detached()
    }
}

/// Locale fixed at construction
pub struct FixedLocale(pub Option<String>);

impl LocalePort for FixedLocale {
    fn locale_identifier(&self) -> Option<String> {
        self.0.clone()
    }
}

pub fn spanish_catalog() -> Vec<CatalogVoice> {
    vec![
        CatalogVoice::local("v1", "Uno", "es-CL"),
        CatalogVoice::local("v2", "Two", "en-US"),
    ]
}

pub fn build(
    speech: &Arc<RecordingSpeech>,
    tags: &Arc<FakeTags>,
    store: &Arc<MemoryStore>,
    locale: &str,
    config: ReaderConfig,
) -> Arc<ReaderService> {
    ReaderService::new(
        ReaderPorts {
            speech: Arc::clone(speech) as Arc<dyn SpeechPort>,
            tags: Arc::clone(tags) as Arc<dyn TagPort>,
            store: Arc::clone(store) as Arc<dyn SettingsStorePort>,
            locale: Arc::new(FixedLocale(Some(locale.to_string()))),
        },
        config,
    )
}
