//! Debounced digital input.
use embedded_hal::digital::InputPin;

use crate::clock::Clock;
use crate::config::DebounceConfig;
use crate::debounce::{DebounceState, DebouncerTrait, DefaultDebouncer};
use crate::event::{ButtonEvent, ChannelId};

/// Receiver of the edges confirmed by an [`InputDebouncer`].
///
/// Both methods default to doing nothing, so an implementor only overrides the edges it cares
/// about. Handlers run inline on the polling tick and should return quickly.
pub trait ButtonHandler {
    /// The input became active.
    fn on_press(&mut self, _id: ChannelId) {}

    /// The input became inactive.
    fn on_release(&mut self, _id: ChannelId) {}
}

/// No handler.
impl ButtonHandler for () {}

impl<T: ButtonHandler + ?Sized> ButtonHandler for &mut T {
    fn on_press(&mut self, id: ChannelId) {
        (**self).on_press(id)
    }

    fn on_release(&mut self, id: ChannelId) {
        (**self).on_release(id)
    }
}

/// [`ButtonHandler`] built from two optional closures, settable independently.
///
/// ```ignore
/// let callbacks = ButtonCallbacks::new()
///     .with_press(|id| info!("pressed {}", id))
///     .with_release(|id| info!("released {}", id));
/// ```
pub struct ButtonCallbacks<P = fn(ChannelId), R = fn(ChannelId)> {
    press: Option<P>,
    release: Option<R>,
}

impl ButtonCallbacks {
    /// Callbacks with neither edge registered.
    pub fn new() -> Self {
        Self {
            press: None,
            release: None,
        }
    }
}

impl Default for ButtonCallbacks {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, R> ButtonCallbacks<P, R> {
    /// Register the press callback.
    pub fn with_press<F: FnMut(ChannelId)>(self, f: F) -> ButtonCallbacks<F, R> {
        ButtonCallbacks {
            press: Some(f),
            release: self.release,
        }
    }

    /// Register the release callback.
    pub fn with_release<F: FnMut(ChannelId)>(self, f: F) -> ButtonCallbacks<P, F> {
        ButtonCallbacks {
            press: self.press,
            release: Some(f),
        }
    }
}

impl<P: FnMut(ChannelId), R: FnMut(ChannelId)> ButtonHandler for ButtonCallbacks<P, R> {
    fn on_press(&mut self, id: ChannelId) {
        if let Some(f) = self.press.as_mut() {
            f(id)
        }
    }

    fn on_release(&mut self, id: ChannelId) {
        if let Some(f) = self.release.as_mut() {
            f(id)
        }
    }
}

/// One debounced input channel.
///
/// The pin is active-low: it is wired with a pull-up, so an idle or undriven input reads as
/// inactive. Call [`InputDebouncer::poll`] once per tick.
pub struct InputDebouncer<In: InputPin, C: Clock, H: ButtonHandler = (), D: DebouncerTrait = DefaultDebouncer> {
    /// Channel id passed to the handler
    id: ChannelId,
    /// Input pin
    pin: In,
    /// Time source
    clock: C,
    /// Edge handler
    handler: H,
    /// Debouncer
    debouncer: D,
    /// Confirmed level
    active: bool,
}

impl<In: InputPin, C: Clock> InputDebouncer<In, C> {
    /// Create a debounced input with the default debounce window.
    pub fn new(id: ChannelId, pin: In, clock: C) -> Self {
        Self::with_config(id, pin, clock, DebounceConfig::default())
    }

    /// Create a debounced input with a custom debounce window.
    pub fn with_config(id: ChannelId, pin: In, clock: C, config: DebounceConfig) -> Self {
        InputDebouncer {
            id,
            pin,
            clock,
            handler: (),
            debouncer: DefaultDebouncer::new(config),
            active: false,
        }
    }
}

impl<In: InputPin, C: Clock, H: ButtonHandler, D: DebouncerTrait> InputDebouncer<In, C, H, D> {
    /// Replace the edge handler.
    pub fn with_handler<H2: ButtonHandler>(self, handler: H2) -> InputDebouncer<In, C, H2, D> {
        InputDebouncer {
            id: self.id,
            pin: self.pin,
            clock: self.clock,
            handler,
            debouncer: self.debouncer,
            active: self.active,
        }
    }

    /// Replace the debounce strategy.
    pub fn with_debouncer<D2: DebouncerTrait>(self, debouncer: D2) -> InputDebouncer<In, C, H, D2> {
        InputDebouncer {
            id: self.id,
            pin: self.pin,
            clock: self.clock,
            handler: self.handler,
            debouncer,
            active: self.active,
        }
    }

    /// Read the pin and feed the debouncer.
    ///
    /// When a new level is confirmed, the matching handler method is called and the event is
    /// returned as well. At most one edge is produced per call.
    pub fn poll(&mut self) -> Option<ButtonEvent> {
        let pin_active = self.read_pin();
        let now = self.clock.now();

        match self
            .debouncer
            .detect_change_with_debounce(now, pin_active, self.active)
        {
            DebounceState::Debounced => {
                self.active = pin_active;
                let event = if pin_active {
                    self.handler.on_press(self.id);
                    ButtonEvent::press(self.id)
                } else {
                    self.handler.on_release(self.id);
                    ButtonEvent::release(self.id)
                };
                debug!("Input {} debounced, pressed: {}", self.id, event.pressed);
                Some(event)
            }
            DebounceState::InProgress | DebounceState::Ignored => None,
        }
    }

    /// Whether the confirmed level is active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn id(&self) -> ChannelId {
        self.id
    }

    /// Debounce settings of the active strategy.
    pub fn config(&self) -> DebounceConfig {
        DebounceConfig {
            window: self.debouncer.window(),
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Raw level of the pin, `true` when driven low.
    fn read_pin(&mut self) -> bool {
        match self.pin.is_low() {
            Ok(low) => low,
            Err(_) => {
                // Same as an undriven, pulled-up input
                warn!("Input {} pin read failed, treated as inactive", self.id);
                false
            }
        }
    }
}
