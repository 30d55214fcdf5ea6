//! GPIO line abstractions
//!
//! Provides the output-line trait used by the bit-banged bus and an adapter
//! for `embedded-hal` pins.

use core::convert::Infallible;

/// Digital output line
///
/// Setting a line cannot fail: the LCD bus has no error signalling, so a
/// line implementation either drives the level or the hardware is broken
/// beyond what the driver could detect anyway.
pub trait OutputPin {
    /// Drive the line high (logic 1)
    fn set_high(&mut self);

    /// Drive the line low (logic 0)
    fn set_low(&mut self);

    /// Drive the line to a specific level
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }
}

impl<T: OutputPin + ?Sized> OutputPin for &mut T {
    fn set_high(&mut self) {
        T::set_high(self)
    }

    fn set_low(&mut self) {
        T::set_low(self)
    }
}

/// Adapter from an `embedded-hal` output pin
///
/// Only pins with an `Infallible` error type are accepted, which covers the
/// plain GPIO outputs of the usual chip HALs (embassy-rp, rp2040-hal, ...).
pub struct HalPin<P> {
    pin: P,
}

impl<P> HalPin<P>
where
    P: embedded_hal::digital::OutputPin<Error = Infallible>,
{
    /// Wrap an `embedded-hal` output pin
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Release the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P> OutputPin for HalPin<P>
where
    P: embedded_hal::digital::OutputPin<Error = Infallible>,
{
    fn set_high(&mut self) {
        match self.pin.set_high() {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    fn set_low(&mut self) {
        match self.pin.set_low() {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }
}
