//! Input layer of the pedal controller.
//!
//! Two independent, poll-driven components turn noisy signals into clean events:
//!
//! - [`InputDebouncer`] converts raw readings of an active-low pin into press/release events.
//! - [`FramedSignalReader`] extracts the `beat:<n>;` value from a serial byte stream and reports
//!   when that value goes stale.
//!
//! Both are driven by the caller's control loop: call `poll()` once per tick. Hardware access is
//! injected through [`embedded_hal::digital::InputPin`], [`embedded_io::Read`] +
//! [`embedded_io::ReadReady`] and [`Clock`].
//!
//! ## Feature flags
#![doc = document_features::document_features!()]
#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod button;
pub mod clock;
pub mod config;
pub mod debounce;
pub mod event;
pub mod frame;
pub mod signal;

#[cfg(test)]
pub(crate) mod test_utils;

pub use button::{ButtonCallbacks, ButtonHandler, InputDebouncer};
pub use clock::{Clock, SystemClock};
pub use config::{DebounceConfig, SignalConfig};
pub use event::{Beat, ButtonEvent, ChannelId};
pub use frame::FrameError;
pub use signal::{FramedSignalReader, SignalCallback, SignalHandler};

/// Minimal time a raw pin level must stay unchanged before it is trusted, in milliseconds.
pub const DEBOUNCE_WINDOW_MS: u64 = 5;

/// Time without a fresh beat after which the signal is reported as lost, in milliseconds.
pub const SIGNAL_TIMEOUT_MS: u64 = 2000;

/// Quiet time on the serial line after which a pending partial frame is completed, in milliseconds.
pub const FRAME_TIMEOUT_MS: u64 = 1000;

/// Default capacity of the frame accumulation buffer.
pub const FRAME_BUFFER_SIZE: usize = 128;

/// Byte terminating a frame on the serial line.
pub const FRAME_DELIMITER: u8 = b';';

/// Tag that a beat frame starts with.
pub const BEAT_TAG: &[u8] = b"beat:";

/// Wire value of [`Beat::Absent`].
pub const NO_BEAT: i32 = -1;
