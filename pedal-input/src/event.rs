//! Events emitted by the input components.
use crate::NO_BEAT;

/// Identifier of a debounced input channel, passed to the press/release handlers.
pub type ChannelId = u8;

/// A confirmed edge of a debounced input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEvent {
    /// The channel the edge was detected on
    pub id: ChannelId,
    /// `true` for a press (input became active), `false` for a release
    pub pressed: bool,
}

impl ButtonEvent {
    pub fn press(id: ChannelId) -> Self {
        Self { id, pressed: true }
    }

    pub fn release(id: ChannelId) -> Self {
        Self { id, pressed: false }
    }
}

/// The beat value carried by the serial signal.
///
/// On the wire and in the integer conversions, [`Beat::Absent`] is [`NO_BEAT`] (`-1`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Beat {
    /// A beat value received within the timeout
    Present(i32),
    /// No signal: nothing received yet, or the signal timed out
    #[default]
    Absent,
}

impl Beat {
    pub fn is_present(&self) -> bool {
        matches!(self, Beat::Present(_))
    }

    /// The beat value, if any.
    pub fn get(&self) -> Option<i32> {
        match self {
            Beat::Present(v) => Some(*v),
            Beat::Absent => None,
        }
    }
}

impl From<i32> for Beat {
    fn from(value: i32) -> Self {
        if value == NO_BEAT {
            Beat::Absent
        } else {
            Beat::Present(value)
        }
    }
}

impl From<Beat> for i32 {
    fn from(beat: Beat) -> Self {
        match beat {
            Beat::Present(v) => v,
            Beat::Absent => NO_BEAT,
        }
    }
}
