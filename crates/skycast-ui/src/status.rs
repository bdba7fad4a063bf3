//! Transient status line.
//!
//! A message is shown at full opacity and dims once the fade delay has
//! elapsed. Setting a new message restarts the delay. Nothing here blocks or
//! sleeps; front-ends ask for the opacity whenever they redraw.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const FULL_OPACITY: f32 = 1.0;
pub const FADED_OPACITY: f32 = 0.7;
pub const DEFAULT_FADE_AFTER: Duration = Duration::from_secs(2);

#[derive(Debug)]
struct StatusState {
    message: String,
    set_at: Instant,
}

/// Cloneable handle; clones share one status line.
#[derive(Debug, Clone)]
pub struct StatusNotifier {
    state: Arc<Mutex<StatusState>>,
    fade_after: Duration,
}

impl Default for StatusNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_FADE_AFTER)
    }
}

impl StatusNotifier {
    pub fn new(fade_after: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(StatusState {
                message: String::new(),
                set_at: Instant::now(),
            })),
            fade_after,
        }
    }

    pub fn set(&self, message: impl Into<String>) {
        self.set_at(message, Instant::now());
    }

    /// Like [`Self::set`] with an explicit timestamp
    pub fn set_at(&self, message: impl Into<String>, now: Instant) {
        let message = message.into();
        tracing::info!(status = %message);
        let mut state = self.state.lock();
        state.message = message;
        state.set_at = now;
    }

    pub fn message(&self) -> String {
        self.state.lock().message.clone()
    }

    pub fn opacity(&self) -> f32 {
        self.opacity_at(Instant::now())
    }

    pub fn opacity_at(&self, now: Instant) -> f32 {
        let state = self.state.lock();
        if now.saturating_duration_since(state.set_at) < self.fade_after {
            FULL_OPACITY
        } else {
            FADED_OPACITY
        }
    }
}
