//! Frame accumulation and parsing for the serial beat protocol.
//!
//! A frame is the text between two `;` delimiters. The only recognized frame is
//! `beat:<decimal-integer>`; everything else is dropped.
use heapless::Vec;

use crate::BEAT_TAG;
use crate::event::Beat;

/// Reasons a frame produced no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// The frame does not start with the beat tag
    UnknownTag,
    /// Nothing follows the beat tag
    EmptyPayload,
    /// The frame did not fit in the accumulation buffer
    TooLong,
    /// The serial stream reported an error
    Serial,
}

/// Accumulation buffer for one frame, never written past `N` bytes.
///
/// Once a byte is rejected the buffer stays in the overflowed state, and keeps rejecting bytes,
/// until it is cleared.
#[derive(Debug, Default)]
pub struct FrameBuffer<const N: usize> {
    bytes: Vec<u8, N>,
    overflowed: bool,
}

impl<const N: usize> FrameBuffer<N> {
    pub fn new() -> Self {
        Self {
            bytes: Vec::new(),
            overflowed: false,
        }
    }

    /// Append a byte, or mark the frame as too long and drop its content.
    pub fn push(&mut self, byte: u8) -> Result<(), FrameError> {
        if self.overflowed {
            return Err(FrameError::TooLong);
        }
        self.bytes.push(byte).map_err(|_| {
            self.bytes.clear();
            self.overflowed = true;
            FrameError::TooLong
        })
    }

    /// Parse the accumulated frame and reset the buffer for the next one.
    pub fn finish(&mut self) -> Result<Beat, FrameError> {
        let result = if self.overflowed {
            Err(FrameError::TooLong)
        } else {
            parse_frame(&self.bytes)
        };
        self.clear();
        result
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
        self.overflowed = false;
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_overflowed(&self) -> bool {
        self.overflowed
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

/// Parse one frame, without its delimiter.
///
/// The payload after the tag is parsed leniently, see [`parse_decimal`]. A frame holding the tag
/// alone is ignored.
pub fn parse_frame(frame: &[u8]) -> Result<Beat, FrameError> {
    let payload = frame.strip_prefix(BEAT_TAG).ok_or(FrameError::UnknownTag)?;
    if payload.is_empty() {
        return Err(FrameError::EmptyPayload);
    }
    Ok(Beat::from(parse_decimal(payload)))
}

/// Lenient decimal parse.
///
/// Leading whitespace is skipped, then an optional sign and the digits up to the first non-digit
/// byte are read. No digits gives 0. Values out of range saturate.
pub fn parse_decimal(bytes: &[u8]) -> i32 {
    let mut rest = bytes;
    while let [b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r', tail @ ..] = rest {
        rest = tail;
    }

    let negative = match rest {
        [b'-', tail @ ..] => {
            rest = tail;
            true
        }
        [b'+', tail @ ..] => {
            rest = tail;
            false
        }
        _ => false,
    };

    // One past i32::MAX so that i32::MIN survives the negation
    const LIMIT: i64 = i32::MAX as i64 + 1;
    let mut magnitude: i64 = 0;
    for &b in rest.iter().take_while(|b| b.is_ascii_digit()) {
        magnitude = (magnitude * 10 + i64::from(b - b'0')).min(LIMIT);
    }

    let value = if negative { -magnitude } else { magnitude };
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
