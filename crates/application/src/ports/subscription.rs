//! Disposable handle for registered listeners

use std::fmt;

type Dispose = Box<dyn FnOnce() + Send + Sync>;

/// Handle returned when a listener is registered with a platform service
///
/// Dropping the handle (or calling [`Subscription::dispose`]) detaches the
/// listener. A detached handle does nothing on drop.
#[must_use = "dropping a subscription detaches its listener"]
pub struct Subscription {
    dispose: Option<Dispose>,
}

impl Subscription {
    /// Create a subscription that runs `dispose` when released
    pub fn new(dispose: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            dispose: Some(Box::new(dispose)),
        }
    }

    /// Subscription with nothing to release
    pub const fn detached() -> Self {
        Self { dispose: None }
    }

    /// Whether dropping this handle will release anything
    pub const fn is_active(&self) -> bool {
        self.dispose.is_some()
    }

    /// Release the listener now
    pub fn dispose(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(dispose) = self.dispose.take() {
            dispose();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
