//! Monotonic time source used by the input components.
use embassy_time::{Duration, Instant};

/// A monotonic, non-decreasing time source.
///
/// All timing decisions of [`crate::InputDebouncer`] and [`crate::FramedSignalReader`] are made
/// against the instant returned by `now`, so tests can drive both with a simulated clock.
pub trait Clock {
    /// Current instant.
    fn now(&self) -> Instant;
}

/// Clock backed by the embassy time driver.
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Time elapsed from `earlier` to `now`, zero if the clock reports an earlier instant.
pub(crate) fn elapsed(now: Instant, earlier: Instant) -> Duration {
    now.checked_duration_since(earlier).unwrap_or(Duration::MIN)
}
