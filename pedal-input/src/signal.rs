//! Framed serial beat signal.
use embassy_time::Instant;
use embedded_io::{Read, ReadReady};

use crate::clock::{Clock, elapsed};
use crate::config::SignalConfig;
use crate::event::Beat;
use crate::frame::{FrameBuffer, FrameError};
use crate::{FRAME_BUFFER_SIZE, FRAME_DELIMITER};

/// Receiver of the beat value updates of a [`FramedSignalReader`].
///
/// Called on every update, also when the value did not change: each received frame and each poll
/// past the timeout produce a call.
pub trait SignalHandler {
    fn on_value(&mut self, _value: Beat) {}
}

/// No handler.
impl SignalHandler for () {}

impl<T: SignalHandler + ?Sized> SignalHandler for &mut T {
    fn on_value(&mut self, value: Beat) {
        (**self).on_value(value)
    }
}

/// [`SignalHandler`] built from an optional closure.
pub struct SignalCallback<F = fn(Beat)> {
    callback: Option<F>,
}

impl SignalCallback {
    /// No callback registered.
    pub fn none() -> Self {
        Self { callback: None }
    }
}

impl<F: FnMut(Beat)> SignalCallback<F> {
    pub fn new(callback: F) -> Self {
        Self {
            callback: Some(callback),
        }
    }
}

impl<F: FnMut(Beat)> SignalHandler for SignalCallback<F> {
    fn on_value(&mut self, value: Beat) {
        if let Some(f) = self.callback.as_mut() {
            f(value)
        }
    }
}

/// Reads `beat:<n>;` frames from a serial stream and tracks the freshness of the value.
///
/// Call [`FramedSignalReader::poll`] once per tick. It never blocks: bytes are only read while the
/// stream reports them ready, at most one frame is handled per call, and at most `N + 1` bytes are
/// read. A frame longer than `N` bytes is dropped as a whole.
pub struct FramedSignalReader<S: Read + ReadReady, C: Clock, H: SignalHandler = (), const N: usize = FRAME_BUFFER_SIZE>
{
    /// Serial stream
    stream: S,
    /// Time source
    clock: C,
    /// Value handler
    handler: H,
    config: SignalConfig,
    /// Pending frame
    buffer: FrameBuffer<N>,
    /// Confirmed value
    value: Beat,
    /// When the last present value was set
    last_fresh: Instant,
    /// When the last byte of the pending frame arrived, `None` if no frame is pending
    last_byte: Option<Instant>,
}

impl<S: Read + ReadReady, C: Clock> FramedSignalReader<S, C> {
    /// Create a reader with the default timeouts and buffer size.
    pub fn new(stream: S, clock: C) -> Self {
        Self::with_config(stream, clock, SignalConfig::default())
    }

    /// Create a reader with custom timeouts.
    pub fn with_config(stream: S, clock: C, config: SignalConfig) -> Self {
        Self::with_capacity(stream, clock, config)
    }
}

impl<S: Read + ReadReady, C: Clock, const N: usize> FramedSignalReader<S, C, (), N> {
    /// Create a reader with custom timeouts and an `N` bytes frame buffer.
    ///
    /// The freshness timer starts now, so the signal is reported lost one timeout after creation
    /// if no beat arrives.
    pub fn with_capacity(stream: S, clock: C, config: SignalConfig) -> Self {
        let now = clock.now();
        FramedSignalReader {
            stream,
            clock,
            handler: (),
            config,
            buffer: FrameBuffer::new(),
            value: Beat::Absent,
            last_fresh: now,
            last_byte: None,
        }
    }
}

impl<S: Read + ReadReady, C: Clock, H: SignalHandler, const N: usize> FramedSignalReader<S, C, H, N> {
    /// Replace the value handler.
    pub fn with_handler<H2: SignalHandler>(self, handler: H2) -> FramedSignalReader<S, C, H2, N> {
        FramedSignalReader {
            stream: self.stream,
            clock: self.clock,
            handler,
            config: self.config,
            buffer: self.buffer,
            value: self.value,
            last_fresh: self.last_fresh,
            last_byte: self.last_byte,
        }
    }

    /// Take in available bytes, then check the freshness of the value.
    pub fn poll(&mut self) {
        let now = self.clock.now();

        match self.read_frame(now) {
            Some(Ok(value)) => self.update(value, now),
            Some(Err(FrameError::TooLong)) => debug!("Overlong frame ended"),
            Some(Err(FrameError::Serial)) => error!("Serial read error, pending frame dropped"),
            Some(Err(e)) => debug!("Ignored frame: {:?}", e),
            None => {}
        }

        if elapsed(now, self.last_fresh) > self.config.timeout {
            if self.value.is_present() {
                info!("Beat signal lost");
            }
            self.update(Beat::Absent, now);
        }
    }

    /// Set the confirmed value and notify the handler.
    ///
    /// A present value also restarts the freshness timer. The handler is called even if the value
    /// did not change.
    pub fn set_value(&mut self, value: Beat) {
        let now = self.clock.now();
        self.update(value, now);
    }

    /// The confirmed value.
    pub fn value(&self) -> Beat {
        self.value
    }

    pub fn config(&self) -> &SignalConfig {
        &self.config
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    fn update(&mut self, value: Beat, now: Instant) {
        if value.is_present() {
            self.last_fresh = now;
        }
        self.value = value;
        trace!("Beat value: {:?}", value);
        self.handler.on_value(value);
    }

    /// Read bytes up to the next delimiter.
    ///
    /// Returns the parsed frame once a delimiter arrives, or once a pending frame has been quiet for
    /// longer than the frame timeout. Returns `None` while the frame is incomplete.
    fn read_frame(&mut self, now: Instant) -> Option<Result<Beat, FrameError>> {
        for _ in 0..=N {
            match self.stream.read_ready() {
                Ok(true) => {}
                Ok(false) => break,
                Err(_) => return Some(self.drop_frame()),
            }

            let mut byte = [0_u8; 1];
            match self.stream.read(&mut byte) {
                Ok(0) => break,
                Ok(_) => {}
                Err(_) => return Some(self.drop_frame()),
            }

            if byte[0] == FRAME_DELIMITER {
                self.last_byte = None;
                return Some(self.buffer.finish());
            }

            let dropping = self.buffer.is_overflowed();
            if self.buffer.push(byte[0]).is_err() && !dropping {
                warn!("Frame longer than {} bytes, dropping until the next delimiter", N);
            }
            self.last_byte = Some(now);
        }

        if let (Some(limit), Some(last_byte)) = (self.config.frame_timeout, self.last_byte) {
            if elapsed(now, last_byte) > limit {
                debug!("Frame completed by timeout");
                self.last_byte = None;
                return Some(self.buffer.finish());
            }
        }

        None
    }

    fn drop_frame(&mut self) -> Result<Beat, FrameError> {
        self.buffer.clear();
        self.last_byte = None;
        Err(FrameError::Serial)
    }
}
