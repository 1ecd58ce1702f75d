use embassy_time::Duration;

use crate::{DEBOUNCE_WINDOW_MS, FRAME_TIMEOUT_MS, SIGNAL_TIMEOUT_MS};

/// Config for input debouncing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DebounceConfig {
    /// How long a raw level must stay unchanged before it becomes the confirmed level
    pub window: Duration,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_millis(DEBOUNCE_WINDOW_MS),
        }
    }
}

/// Config for the framed serial signal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignalConfig {
    /// Time since the last fresh value after which the signal is reported as lost.
    pub timeout: Duration,
    /// Quiet time after which a pending frame without delimiter is completed.
    /// `None` waits for the delimiter forever.
    pub frame_timeout: Option<Duration>,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(SIGNAL_TIMEOUT_MS),
            frame_timeout: Some(Duration::from_millis(FRAME_TIMEOUT_MS)),
        }
    }
}
