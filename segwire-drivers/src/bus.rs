//! 3-wire GPIO bus
//!
//! Owns the chip-select, write-clock and data lines. CS idles high; pulling
//! it low opens a transaction and the controller samples DATA on every
//! rising edge of WR while it stays low.
//!
//! # Bit timing
//!
//! ```text
//!  CS  ‾‾‾|___________________________________|‾‾‾
//!  WR  ‾‾‾‾‾‾‾‾|_____|‾‾‾‾‾|_____|‾‾‾‾‾ ... ‾‾‾‾‾‾‾
//! DATA ________X bit0      X bit1
//!         ^ settle  ^ sample     ^ sample        ^ settle
//! ```
//!
//! Every transition is followed by one bus cycle of the [`BusDelay`].
//! Bits go out least-significant first.

use segwire_hal::{BusDelay, OutputPin};
use segwire_protocol::WireWord;

/// Chip-select, write-clock and data lines plus the bus-cycle delay
pub struct GpioBus<CS, WR, DAT, D> {
    cs: CS,
    wr: WR,
    data: DAT,
    delay: D,
}

impl<CS, WR, DAT, D> GpioBus<CS, WR, DAT, D>
where
    CS: OutputPin,
    WR: OutputPin,
    DAT: OutputPin,
    D: BusDelay,
{
    /// Take ownership of the lines and put them in their idle state
    ///
    /// CS and WR are driven high, DATA low. The pins must already be
    /// outputs, which the `OutputPin` types guarantee.
    pub fn new(cs: CS, wr: WR, data: DAT, delay: D) -> Self {
        let mut bus = Self {
            cs,
            wr,
            data,
            delay,
        };
        bus.configure();
        bus
    }

    fn configure(&mut self) {
        self.cs.set_high();
        self.wr.set_high();
        self.data.set_low();
    }

    /// Open a transaction
    ///
    /// The returned guard is the only way to clock bits out, and the bus
    /// stays borrowed until it is closed, so transactions cannot nest.
    pub fn begin_transaction(&mut self) -> Transaction<'_, CS, WR, DAT, D> {
        self.wr.set_high();
        // Controller starts listening on the falling edge
        self.cs.set_low();
        self.delay.delay_bus_cycle();
        Transaction { bus: self }
    }

    fn end_transaction(&mut self) {
        self.wr.set_high();
        self.cs.set_high();
        self.delay.delay_bus_cycle();
    }

    /// Lower WR and present the next bit on DATA
    fn set_data_bit(&mut self, high: bool) {
        self.wr.set_low();
        self.data.set_state(high);
    }

    /// Raise WR; the controller latches DATA on this edge
    fn pulse_clock(&mut self) {
        self.wr.set_high();
    }

    fn transmit<const BITS: u32>(&mut self, word: WireWord<BITS>) {
        let mut bits = word.value();
        for _ in 0..BITS {
            self.set_data_bit(bits & 1 != 0);
            self.delay.delay_bus_cycle();

            bits >>= 1;
            self.pulse_clock();
            self.delay.delay_bus_cycle();
        }
    }

    /// Give the lines and delay back
    pub fn release(self) -> (CS, WR, DAT, D) {
        (self.cs, self.wr, self.data, self.delay)
    }
}

/// An open transaction: CS is low until this is ended or dropped
pub struct Transaction<'a, CS, WR, DAT, D>
where
    CS: OutputPin,
    WR: OutputPin,
    DAT: OutputPin,
    D: BusDelay,
{
    bus: &'a mut GpioBus<CS, WR, DAT, D>,
}

impl<CS, WR, DAT, D> Transaction<'_, CS, WR, DAT, D>
where
    CS: OutputPin,
    WR: OutputPin,
    DAT: OutputPin,
    D: BusDelay,
{
    /// Clock out a word, bit 0 first, one WR rising edge per bit
    ///
    /// WR is left high after the last bit.
    pub fn transmit<const BITS: u32>(&mut self, word: WireWord<BITS>) {
        self.bus.transmit(word);
    }

    /// Close the transaction: CS high, then one settle cycle
    pub fn end(self) {
        drop(self);
    }
}

impl<CS, WR, DAT, D> Drop for Transaction<'_, CS, WR, DAT, D>
where
    CS: OutputPin,
    WR: OutputPin,
    DAT: OutputPin,
    D: BusDelay,
{
    fn drop(&mut self) {
        self.bus.end_transaction();
    }
}
