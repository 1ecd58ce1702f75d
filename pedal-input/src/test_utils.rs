//! Simulated hardware for unit tests.
use core::cell::{Cell, RefCell};
use core::convert::Infallible;
use std::collections::VecDeque;
use std::vec::Vec;

use embassy_time::Instant;
use embedded_hal::digital::{ErrorKind, ErrorType, InputPin};

use crate::button::ButtonHandler;
use crate::clock::Clock;
use crate::event::{Beat, ChannelId};
use crate::signal::SignalHandler;

/// Manually advanced clock, in milliseconds.
#[derive(Default)]
pub(crate) struct TestClock {
    now: Cell<u64>,
}

impl TestClock {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for TestClock {
    fn now(&self) -> Instant {
        Instant::from_millis(self.now.get())
    }
}

/// Pin whose electrical level is driven from the test through a shared cell.
pub(crate) struct TestPin<'a> {
    pub(crate) low: &'a Cell<bool>,
    pub(crate) broken: &'a Cell<bool>,
}

impl ErrorType for TestPin<'_> {
    type Error = ErrorKind;
}

impl InputPin for TestPin<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.is_low().map(|low| !low)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        if self.broken.get() {
            Err(ErrorKind::Other)
        } else {
            Ok(self.low.get())
        }
    }
}

/// Serial stream fed from the test.
pub(crate) struct TestSerial<'a> {
    pub(crate) rx: &'a RefCell<VecDeque<u8>>,
}

impl embedded_io::ErrorType for TestSerial<'_> {
    type Error = Infallible;
}

impl embedded_io::Read for TestSerial<'_> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut rx = self.rx.borrow_mut();
        let mut n = 0;
        while n < buf.len() {
            match rx.pop_front() {
                Some(byte) => {
                    buf[n] = byte;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }
}

impl embedded_io::ReadReady for TestSerial<'_> {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.rx.borrow().is_empty())
    }
}

pub(crate) fn feed(rx: &RefCell<VecDeque<u8>>, bytes: &[u8]) {
    rx.borrow_mut().extend(bytes.iter().copied());
}

/// Handler recording every callback it receives.
#[derive(Default)]
pub(crate) struct Recorder {
    pub(crate) presses: Vec<ChannelId>,
    pub(crate) releases: Vec<ChannelId>,
    pub(crate) values: Vec<Beat>,
}

impl ButtonHandler for Recorder {
    fn on_press(&mut self, id: ChannelId) {
        self.presses.push(id);
    }

    fn on_release(&mut self, id: ChannelId) {
        self.releases.push(id);
    }
}

impl SignalHandler for Recorder {
    fn on_value(&mut self, value: Beat) {
        self.values.push(value);
    }
}
