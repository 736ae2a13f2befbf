//! Settings overlay gesture gate
//!
//! Requires several activations within a short window before the overlay
//! opens, so a single stray tap does nothing.

use std::time::{Duration, Instant};

/// Counts activations inside a time window
#[derive(Debug, Clone)]
pub struct GestureGate {
    required: u32,
    window: Duration,
    count: u32,
    window_start: Option<Instant>,
}

impl GestureGate {
    /// Create a gate opening after `required` activations within `window`
    pub const fn new(required: u32, window: Duration) -> Self {
        Self {
            required,
            window,
            count: 0,
            window_start: None,
        }
    }

    /// Register an activation now
    pub fn activate(&mut self) -> bool {
        self.activate_at(Instant::now())
    }

    /// Register an activation at `now`; returns `true` when the gate opens
    ///
    /// The counter restarts when the window has elapsed and is cleared on
    /// success.
    pub fn activate_at(&mut self, now: Instant) -> bool {
        if self.is_expired(now) {
            self.reset();
        }
        if self.count == 0 {
            self.window_start = Some(now);
        }
        self.count += 1;

        if self.count >= self.required {
            self.reset();
            return true;
        }
        false
    }

    /// Activations counted towards opening at `now`
    pub fn pending_at(&self, now: Instant) -> u32 {
        if self.is_expired(now) { 0 } else { self.count }
    }

    /// Forget pending activations
    pub fn reset(&mut self) {
        self.count = 0;
        self.window_start = None;
    }

    fn is_expired(&self, now: Instant) -> bool {
        self.window_start
            .is_some_and(|start| now.saturating_duration_since(start) > self.window)
    }
}

impl Default for GestureGate {
    fn default() -> Self {
        Self::new(2, Duration::from_millis(500))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(500);

    #[test]
    fn double_tap_inside_window_opens_once() {
        let mut gate = GestureGate::new(2, WINDOW);
        let t0 = Instant::now();
        assert!(!gate.activate_at(t0));
        assert!(gate.activate_at(t0 + Duration::from_millis(200)));
        assert_eq!(gate.pending_at(t0 + Duration::from_millis(200)), 0);
        // a third tap starts over instead of reopening
        assert!(!gate.activate_at(t0 + Duration::from_millis(300)));
    }

    #[test]
    fn pause_longer_than_window_resets() {
        let mut gate = GestureGate::new(2, WINDOW);
        let t0 = Instant::now();
        assert!(!gate.activate_at(t0));
        let later = t0 + Duration::from_millis(700);
        assert_eq!(gate.pending_at(later), 0);
        assert!(!gate.activate_at(later));
        assert_eq!(gate.pending_at(later), 1);
    }

    #[test]
    fn triple_tap_gate() {
        let mut gate = GestureGate::new(3, WINDOW);
        let t0 = Instant::now();
        assert!(!gate.activate_at(t0));
        assert!(!gate.activate_at(t0 + Duration::from_millis(100)));
        assert_eq!(gate.pending_at(t0 + Duration::from_millis(100)), 2);
        assert!(gate.activate_at(t0 + Duration::from_millis(400)));
    }

    #[test]
    fn window_is_measured_from_first_tap() {
        let mut gate = GestureGate::new(3, WINDOW);
        let t0 = Instant::now();
        gate.activate_at(t0);
        gate.activate_at(t0 + Duration::from_millis(400));
        assert!(!gate.activate_at(t0 + Duration::from_millis(600)));
        assert_eq!(gate.pending_at(t0 + Duration::from_millis(600)), 1);
    }

    #[test]
    fn single_tap_gate_opens_immediately() {
        let mut gate = GestureGate::new(1, WINDOW);
        assert!(gate.activate());
    }

    #[test]
    fn default_is_double_tap_half_second() {
        let mut gate = GestureGate::default();
        let t0 = Instant::now();
        gate.activate_at(t0);
        assert!(gate.activate_at(t0 + Duration::from_millis(499)));
    }
}
