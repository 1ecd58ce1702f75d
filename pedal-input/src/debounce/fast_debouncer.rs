use embassy_time::{Duration, Instant};

use super::{DebounceState, DebouncerTrait};
use crate::clock::elapsed;
use crate::config::DebounceConfig;

/// Fast (eager) debouncer.
///
/// A change is committed on the first read that sees it, then the input is locked for the
/// debounce window so the bounces that follow the edge are ignored.
#[derive(Clone, Copy, Debug)]
pub struct FastDebouncer {
    window: Duration,
    /// Start of the current lockout, if any
    locked_since: Option<Instant>,
}

impl Default for FastDebouncer {
    fn default() -> Self {
        Self::new(DebounceConfig::default())
    }
}

impl FastDebouncer {
    /// Create a fast debouncer
    pub fn new(config: DebounceConfig) -> Self {
        FastDebouncer {
            window: config.window,
            locked_since: None,
        }
    }
}

impl DebouncerTrait for FastDebouncer {
    fn detect_change_with_debounce(
        &mut self,
        now: Instant,
        pin_active: bool,
        confirmed_active: bool,
    ) -> DebounceState {
        if let Some(start) = self.locked_since {
            if elapsed(now, start) < self.window {
                return DebounceState::InProgress;
            }
            self.locked_since = None;
        }

        if pin_active != confirmed_active {
            // Trigger immediately and start the lockout
            self.locked_since = Some(now);
            DebounceState::Debounced
        } else {
            DebounceState::Ignored
        }
    }

    fn window(&self) -> Duration {
        self.window
    }
}
