#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use embassy_time::Instant;
use embedded_hal::digital::{self, InputPin};
use embedded_io::{ErrorKind, ErrorType, Read, ReadReady};
use pedal_input::{Beat, ButtonHandler, ChannelId, Clock, SignalHandler};

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

/// Simulated millisecond clock, cloned handles share the time.
#[derive(Clone, Default)]
pub struct SimClock {
    now: Rc<Cell<u64>>,
}

impl SimClock {
    pub fn at(ms: u64) -> Self {
        let clock = Self::default();
        clock.now.set(ms);
        clock
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for SimClock {
    fn now(&self) -> Instant {
        Instant::from_millis(self.now.get())
    }
}

/// Active-low push button, `press` drives the line low.
#[derive(Clone, Default)]
pub struct SimPin {
    low: Rc<Cell<bool>>,
}

impl SimPin {
    pub fn press(&self) {
        self.low.set(true);
    }

    pub fn release(&self) {
        self.low.set(false);
    }

    pub fn set_low(&self, low: bool) {
        self.low.set(low);
    }
}

impl digital::ErrorType for SimPin {
    type Error = digital::ErrorKind;
}

impl InputPin for SimPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.low.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.low.get())
    }
}

/// Serial line fed by the test. Set `fail` to make the next access report an error.
#[derive(Clone, Default)]
pub struct SimSerial {
    rx: Rc<RefCell<VecDeque<u8>>>,
    fail: Rc<Cell<bool>>,
}

impl SimSerial {
    pub fn send(&self, bytes: &[u8]) {
        self.rx.borrow_mut().extend(bytes.iter().copied());
    }

    pub fn pending(&self) -> usize {
        self.rx.borrow().len()
    }

    pub fn fail_next(&self) {
        self.fail.set(true);
    }

    fn check(&self) -> Result<(), ErrorKind> {
        if self.fail.replace(false) {
            Err(ErrorKind::Other)
        } else {
            Ok(())
        }
    }
}

impl ErrorType for SimSerial {
    type Error = ErrorKind;
}

impl Read for SimSerial {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.check()?;
        let mut rx = self.rx.borrow_mut();
        let n = buf.len().min(rx.len());
        for (slot, byte) in buf.iter_mut().zip(rx.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }
}

impl ReadReady for SimSerial {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        self.check()?;
        Ok(!self.rx.borrow().is_empty())
    }
}

/// Everything a handler was called with, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Press(ChannelId),
    Release(ChannelId),
    Value(Beat),
}

/// Handler logging its calls into a shared list.
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Rc<RefCell<Vec<Call>>>,
}

impl CallLog {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl ButtonHandler for CallLog {
    fn on_press(&mut self, id: ChannelId) {
        self.calls.borrow_mut().push(Call::Press(id));
    }

    fn on_release(&mut self, id: ChannelId) {
        self.calls.borrow_mut().push(Call::Release(id));
    }
}

impl SignalHandler for CallLog {
    fn on_value(&mut self, value: Beat) {
        self.calls.borrow_mut().push(Call::Value(value));
    }
}
