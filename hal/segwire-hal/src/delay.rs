//! Bus timing
//!
//! Every line transition on the LCD bus is paced by one bus cycle. This is
//! the only place the driver ever waits, and the wait is a busy-wait: no
//! other work runs while a transaction is on the wire.

use embedded_hal::delay::DelayNs;

/// Length of one bus cycle in microseconds
///
/// Derived from an 8 kHz toggle rate. The controller latched reliably at
/// this speed; faster rates were never tried, so this is headroom rather
/// than a datasheet limit.
pub const BUS_CYCLE_US: u32 = 1_000_000 / 8_000;

/// Blocking bus-cycle delay
pub trait BusDelay {
    /// Block for one bus cycle
    fn delay_bus_cycle(&mut self);
}

impl<T: BusDelay + ?Sized> BusDelay for &mut T {
    fn delay_bus_cycle(&mut self) {
        T::delay_bus_cycle(self)
    }
}

/// Adapter from an `embedded-hal` blocking delay
///
/// Waits [`BUS_CYCLE_US`] per bus cycle.
pub struct HalDelay<D> {
    delay: D,
}

impl<D: DelayNs> HalDelay<D> {
    /// Wrap an `embedded-hal` delay provider
    pub fn new(delay: D) -> Self {
        Self { delay }
    }

    /// Release the wrapped delay provider
    pub fn into_inner(self) -> D {
        self.delay
    }
}

impl<D: DelayNs> BusDelay for HalDelay<D> {
    fn delay_bus_cycle(&mut self) {
        self.delay.delay_us(BUS_CYCLE_US);
    }
}
