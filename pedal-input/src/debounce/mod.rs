use embassy_time::{Duration, Instant};

pub mod default_debouncer;
pub mod fast_debouncer;

pub use default_debouncer::DefaultDebouncer;
pub use fast_debouncer::FastDebouncer;

/// Decides when a raw input level is trusted as the new confirmed level.
pub trait DebouncerTrait {
    /// Feed the raw level read at `now`.
    ///
    /// `pin_active` is the raw level, `confirmed_active` is the currently confirmed level.
    /// Returning [`DebounceState::Debounced`] commits `pin_active` as the new confirmed level.
    fn detect_change_with_debounce(
        &mut self,
        now: Instant,
        pin_active: bool,
        confirmed_active: bool,
    ) -> DebounceState;

    /// Debounce window this strategy runs on.
    fn window(&self) -> Duration;
}

/// Debounce state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebounceState {
    Debounced,
    InProgress,
    Ignored,
}
