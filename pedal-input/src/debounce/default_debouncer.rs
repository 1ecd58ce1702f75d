use embassy_time::{Duration, Instant};

use super::{DebounceState, DebouncerTrait};
use crate::clock::elapsed;
use crate::config::DebounceConfig;

/// Stability-window debouncer.
///
/// Every change of the raw level restarts the stability timer. The raw level is committed once it
/// has stayed unchanged for at least the debounce window, so a level that toggles faster than the
/// window never gets through.
#[derive(Clone, Copy, Debug)]
pub struct DefaultDebouncer {
    window: Duration,
    /// Raw level seen on the previous poll
    last_level: bool,
    /// When the raw level last changed
    last_change: Instant,
}

impl Default for DefaultDebouncer {
    fn default() -> Self {
        Self::new(DebounceConfig::default())
    }
}

impl DefaultDebouncer {
    pub fn new(config: DebounceConfig) -> Self {
        DefaultDebouncer {
            window: config.window,
            // Pulled-up input, reads inactive until driven
            last_level: false,
            last_change: Instant::MIN,
        }
    }
}

impl DebouncerTrait for DefaultDebouncer {
    fn detect_change_with_debounce(
        &mut self,
        now: Instant,
        pin_active: bool,
        confirmed_active: bool,
    ) -> DebounceState {
        if pin_active != self.last_level {
            self.last_level = pin_active;
            self.last_change = now;
        }

        if pin_active == confirmed_active {
            return DebounceState::Ignored;
        }

        if elapsed(now, self.last_change) >= self.window {
            DebounceState::Debounced
        } else {
            DebounceState::InProgress
        }
    }

    fn window(&self) -> Duration {
        self.window
    }
}
