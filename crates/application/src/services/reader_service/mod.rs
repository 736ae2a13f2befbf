//! Reader service - orchestrates speech, tag and settings services
//!
//! Startup runs strictly in order:
//! 1. load and filter the voice catalog (`SpeechReady`)
//! 2. restore persisted audio settings (`SettingsRestored`)
//! 3. push settings to the engine and prepare tag reading (`Configured`,
//!    then `Listening` when discovery is registered)
//!
//! Every platform call is best-effort: a failure is logged, published as
//! `ReaderEvent::StepFailed` and the sequence carries on.

mod events;
mod settings;
mod startup;
mod state;
mod tag_cycle;

use std::{fmt, sync::Arc};

use domain::{RadioState, SpeechEvent};
use parking_lot::{Mutex, RwLock};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

pub use events::{ReaderEvent, ReaderStep};
pub use state::{AppState, ReaderPhase, TagReadCycle};

use crate::config::ReaderConfig;
use crate::error::ApplicationError;
use crate::ports::{
    LocalePort, RadioStateListener, SettingsStorePort, SpeechEventListener, SpeechPort,
    Subscription, TagPort,
};
use crate::services::GestureGate;

const EVENT_CAPACITY: usize = 64;

/// Platform services the reader depends on
#[derive(Clone)]
pub struct ReaderPorts {
    pub speech: Arc<dyn SpeechPort>,
    pub tags: Arc<dyn TagPort>,
    pub store: Arc<dyn SettingsStorePort>,
    pub locale: Arc<dyn LocalePort>,
}

impl fmt::Debug for ReaderPorts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReaderPorts").finish_non_exhaustive()
    }
}

/// Controller owning the reader state
///
/// Callbacks from the platform may arrive at any time, including during
/// startup; state updates are last-write-wins.
pub struct ReaderService {
    speech: Arc<dyn SpeechPort>,
    tags: Arc<dyn TagPort>,
    store: Arc<dyn SettingsStorePort>,
    locale: Arc<dyn LocalePort>,
    config: ReaderConfig,
    state: Arc<RwLock<AppState>>,
    gesture: Mutex<GestureGate>,
    events: broadcast::Sender<ReaderEvent>,
    tag_session: Mutex<Option<Subscription>>,
    listeners: Vec<Subscription>,
}

impl fmt::Debug for ReaderService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReaderService")
            .field("config", &self.config)
            .field("phase", &self.state.read().phase)
            .finish_non_exhaustive()
    }
}

impl ReaderService {
    /// Create the service and attach the speech and radio listeners
    ///
    /// Listeners are attached here so they exist before the first `speak`.
    pub fn new(ports: ReaderPorts, config: ReaderConfig) -> Arc<Self> {
        let state = Arc::new(RwLock::new(AppState::new(config.initial_text.clone())));
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        let speech_listener: SpeechEventListener = {
            let state = Arc::clone(&state);
            let events = events.clone();
            Arc::new(move |event: SpeechEvent| {
                let status = event.status();
                state.write().session_status = status;
                debug!(event = event.event_name(), status = %status, "Speech lifecycle event");
                let _ = events.send(ReaderEvent::SessionStatusChanged(status));
            })
        };

        let radio_listener: RadioStateListener = {
            let state = Arc::clone(&state);
            Arc::new(move |radio: RadioState| {
                state.write().radio_state = Some(radio);
                info!(radio = %radio, "NFC radio state changed");
            })
        };

        let listeners = vec![
            ports.speech.add_event_listener(speech_listener),
            ports.tags.on_radio_state_change(radio_listener),
        ];

        let gesture = GestureGate::new(
            config.settings_gesture_taps,
            config.settings_gesture_window,
        );

        Arc::new(Self {
            speech: ports.speech,
            tags: ports.tags,
            store: ports.store,
            locale: ports.locale,
            config,
            state,
            gesture: Mutex::new(gesture),
            events,
            tag_session: Mutex::new(None),
            listeners,
        })
    }

    /// Copy of the current state for rendering
    pub fn snapshot(&self) -> AppState {
        self.state.read().clone()
    }

    /// Subscribe to the diagnostic event stream
    pub fn subscribe_events(&self) -> broadcast::Receiver<ReaderEvent> {
        self.events.subscribe()
    }

    /// Configuration the service was built with
    pub const fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Number of platform listeners held by the service
    pub fn active_listeners(&self) -> usize {
        let tag = usize::from(self.tag_session.lock().is_some());
        self.listeners.iter().filter(|s| s.is_active()).count() + tag
    }

    /// Stop tag detection and playback
    pub async fn shutdown(&self) {
        self.stop_tag_detection().await;
        self.settle(ReaderStep::StopSpeech, self.speech.stop().await);
        info!("Reader shut down");
    }

    fn emit(&self, event: ReaderEvent) {
        // no receivers is fine
        let _ = self.events.send(event);
    }

    fn transition(&self, phase: ReaderPhase) {
        self.state.write().phase = phase;
        info!(phase = %phase, "Reader phase changed");
        self.emit(ReaderEvent::PhaseChanged(phase));
    }

    fn set_tag_cycle(&self, cycle: TagReadCycle) {
        self.state.write().tag_cycle = cycle;
        debug!(cycle = ?cycle, "Tag read cycle");
    }

    /// Log and publish a failed step, keeping the value on success
    fn settle<T>(&self, step: ReaderStep, result: Result<T, ApplicationError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                warn!(step = %step, kind = ?error.kind(), error = %error, "Step failed, continuing");
                self.emit(ReaderEvent::step_failed(step, &error));
                None
            },
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::Mocks;
    use super::*;
    use domain::SessionStatus;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn listeners_attached_on_construction() {
        let mut mocks = Mocks::bare();
        mocks
            .tags
            .expect_on_radio_state_change()
            .returning(|_| Subscription::detached());
        let captured: Arc<Mutex<Option<SpeechEventListener>>> = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&captured);
        mocks
            .speech
            .expect_add_event_listener()
            .times(1)
            .returning(move |listener| {
                *slot.lock() = Some(listener);
                Subscription::detached()
            });

        let service = mocks.build(ReaderConfig::default());
        let listener = captured.lock().clone().unwrap();

        listener(SpeechEvent::Start);
        assert_eq!(service.snapshot().session_status, SessionStatus::Speaking);
        listener(SpeechEvent::Cancel);
        assert_eq!(service.snapshot().session_status, SessionStatus::Cancelled);
    }

    #[test]
    fn dropping_service_disposes_listeners() {
        let disposed = Arc::new(AtomicUsize::new(0));
        let mut mocks = Mocks::bare();
        let counter = Arc::clone(&disposed);
        mocks
            .speech
            .expect_add_event_listener()
            .returning(move |_| {
                let counter = Arc::clone(&counter);
                Subscription::new(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                })
            });
        let counter = Arc::clone(&disposed);
        mocks.tags.expect_on_radio_state_change().returning(move |_| {
            let counter = Arc::clone(&counter);
            Subscription::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
        });

        let service = mocks.build(ReaderConfig::default());
        assert_eq!(service.active_listeners(), 2);
        drop(service);
        assert_eq!(disposed.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn speech_events_are_published() {
        let mut mocks = Mocks::bare();
        mocks
            .tags
            .expect_on_radio_state_change()
            .returning(|_| Subscription::detached());
        let captured: Arc<Mutex<Option<SpeechEventListener>>> = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&captured);
        mocks
            .speech
            .expect_add_event_listener()
            .returning(move |listener| {
                *slot.lock() = Some(listener);
                Subscription::detached()
            });
        let service = mocks.build(ReaderConfig::default());
        let mut events = service.subscribe_events();

        let listener = captured.lock().clone().unwrap();
        listener(SpeechEvent::Finish);

        assert_eq!(
            events.try_recv().unwrap(),
            ReaderEvent::SessionStatusChanged(SessionStatus::Finished)
        );
    }
}
