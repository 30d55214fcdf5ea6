//! HT1621 segment LCD controller
//!
//! The HT1621 is a 32x4 RAM-mapped LCD driver with a write-only 3-wire
//! serial interface (CS, WR, DATA). It never answers, so the driver cannot
//! tell whether a command was latched; every operation here is fire and
//! forget.
//!
//! # Lifecycle
//!
//! ```text
//! pins ──GpioBus::new──▶ LinesConfigured ──initialize()──▶ ChipConfigured
//! ```
//!
//! Memory writes and refreshes only exist on a `ChipConfigured` driver.
//!
//! # Refresh
//!
//! One transaction: the write ID with address 0, then the whole memory
//! image as two 16-bit words. The controller auto-increments its address
//! pointer, so the image is never re-addressed mid-burst.

use core::marker::PhantomData;

use segwire_core::{DisplayMemory, SegmentDisplay, SegmentPattern};
use segwire_hal::{BusDelay, OutputPin};
use segwire_protocol::{BiasRatio, Command, Commons, DataWord, Oscillator, WRITE_AT_ZERO};

use crate::bus::GpioBus;

/// HT1621 driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ht1621Config {
    /// System clock source
    pub oscillator: Oscillator,
    /// Commons driven by the glass
    pub commons: Commons,
    /// Bias ratio for the glass
    pub bias: BiasRatio,
}

impl Default for Ht1621Config {
    fn default() -> Self {
        Self {
            oscillator: Oscillator::InternalRc256k,
            commons: Commons::Four,
            bias: BiasRatio::Half,
        }
    }
}

/// Commands issued by [`Ht1621::initialize`], in order
///
/// The oscillator has to run before the bias settings take effect, and
/// mode and clock selection come before the commons configuration.
pub fn init_sequence(config: &Ht1621Config) -> [Command; 6] {
    [
        Command::NormalMode,
        Command::SystemEnable,
        Command::Oscillator(config.oscillator),
        Command::LcdOn,
        Command::BiasCommons {
            commons: config.commons,
            bias: config.bias,
        },
        Command::ClearWatchdog,
    ]
}

/// Lines idle, controller still in its power-on state
pub struct LinesConfigured;

/// Controller configured and ready for display data
pub struct ChipConfigured;

/// HT1621 driver
///
/// Owns the bus and the local copy of display RAM.
pub struct Ht1621<CS, WR, DAT, D, S> {
    bus: GpioBus<CS, WR, DAT, D>,
    config: Ht1621Config,
    memory: DisplayMemory,
    _state: PhantomData<S>,
}

impl<CS, WR, DAT, D, S> Ht1621<CS, WR, DAT, D, S>
where
    CS: OutputPin,
    WR: OutputPin,
    DAT: OutputPin,
    D: BusDelay,
{
    /// Send one configuration command in its own transaction
    pub fn send_command(&mut self, command: Command) {
        #[cfg(feature = "defmt")]
        defmt::trace!("HT1621 command {} ({:#x})", command, command.code());

        let mut tx = self.bus.begin_transaction();
        tx.transmit(command.word());
        tx.end();
    }

    /// Get the configuration
    pub fn config(&self) -> &Ht1621Config {
        &self.config
    }

    /// Give the bus back
    pub fn release(self) -> GpioBus<CS, WR, DAT, D> {
        self.bus
    }
}

impl<CS, WR, DAT, D> Ht1621<CS, WR, DAT, D, LinesConfigured>
where
    CS: OutputPin,
    WR: OutputPin,
    DAT: OutputPin,
    D: BusDelay,
{
    /// Create a driver on an idle bus
    pub fn new(bus: GpioBus<CS, WR, DAT, D>, config: Ht1621Config) -> Self {
        Self {
            bus,
            config,
            memory: DisplayMemory::new(),
            _state: PhantomData,
        }
    }

    /// Bring the controller from power-on into normal operation
    ///
    /// Sends [`init_sequence`]. There is no retry: a command the controller
    /// missed leaves it in an unknown state that the driver cannot detect.
    pub fn initialize(mut self) -> Ht1621<CS, WR, DAT, D, ChipConfigured> {
        for command in init_sequence(&self.config) {
            self.send_command(command);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("HT1621 initialized: {}", self.config);

        Ht1621 {
            bus: self.bus,
            config: self.config,
            memory: self.memory,
            _state: PhantomData,
        }
    }
}

impl<CS, WR, DAT, D> Ht1621<CS, WR, DAT, D, ChipConfigured>
where
    CS: OutputPin,
    WR: OutputPin,
    DAT: OutputPin,
    D: BusDelay,
{
    /// Set the raw pattern at `position`; past the end is ignored
    pub fn set_memory(&mut self, position: usize, pattern: SegmentPattern) {
        self.memory.set(position, pattern);
    }

    /// Light or clear the decimal point at `position`
    pub fn set_decimal_point(&mut self, position: usize, on: bool) {
        self.memory.set_decimal_point(position, on);
    }

    /// Blank the local memory image
    pub fn clear(&mut self) {
        self.memory.clear();
    }

    /// The local memory image
    pub fn memory(&self) -> &DisplayMemory {
        &self.memory
    }

    /// Write the whole memory image to the controller
    pub fn refresh(&mut self) {
        let words = self.memory.words();

        #[cfg(feature = "defmt")]
        defmt::trace!("HT1621 refresh {:x}", self.memory.as_bytes());

        let mut tx = self.bus.begin_transaction();
        tx.transmit(WRITE_AT_ZERO);
        for word in words {
            tx.transmit(DataWord::new(word));
        }
        tx.end();
    }
}

impl<CS, WR, DAT, D> SegmentDisplay for Ht1621<CS, WR, DAT, D, ChipConfigured>
where
    CS: OutputPin,
    WR: OutputPin,
    DAT: OutputPin,
    D: BusDelay,
{
    fn set_memory(&mut self, position: usize, pattern: SegmentPattern) {
        Self::set_memory(self, position, pattern);
    }

    fn refresh(&mut self) {
        Self::refresh(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{sim_bus, BusTrace, SimBus};
    use core::cell::RefCell;
    use segwire_core::{digit_to_pattern, MEMORY_SIZE};
    use segwire_protocol::code;

    type SimLcd<'a, S> = Ht1621<
        crate::sim::SimPin<'a>,
        crate::sim::SimPin<'a>,
        crate::sim::SimPin<'a>,
        crate::sim::SimDelay<'a>,
        S,
    >;

    fn ready(trace: &RefCell<BusTrace>) -> SimLcd<'_, ChipConfigured> {
        let lcd = Ht1621::new(sim_bus(trace), Ht1621Config::default()).initialize();
        trace.borrow_mut().clear();
        lcd
    }

    #[test]
    fn test_default_config() {
        let config = Ht1621Config::default();
        assert_eq!(config.oscillator, Oscillator::InternalRc256k);
        assert_eq!(config.commons, Commons::Four);
        assert_eq!(config.bias, BiasRatio::Half);
    }

    #[test]
    fn test_init_sequence_order() {
        let seq = init_sequence(&Ht1621Config::default());
        assert_eq!(
            seq,
            [
                Command::NormalMode,
                Command::SystemEnable,
                Command::Oscillator(Oscillator::InternalRc256k),
                Command::LcdOn,
                Command::BiasCommons {
                    commons: Commons::Four,
                    bias: BiasRatio::Half,
                },
                Command::ClearWatchdog,
            ]
        );
    }

    #[test]
    fn test_initialize_on_the_wire() {
        let trace = RefCell::new(BusTrace::new());
        let _lcd = Ht1621::new(sim_bus(&trace), Ht1621Config::default()).initialize();

        let t = trace.borrow();
        let codes: [u16; 6] = core::array::from_fn(|i| t.frames()[i].field(0, 12));
        assert_eq!(t.frames().len(), 6);
        assert!(t.frames().iter().all(|f| f.len() == 12));
        assert_eq!(
            codes,
            [
                code::NORMAL_MODE,
                code::SYSTEM_ENABLE,
                code::OSC_RC256K,
                code::LCD_ON,
                code::BIAS_HALF_4COM,
                code::CLEAR_WATCHDOG,
            ]
        );
        assert_eq!(codes, [0x639, 0x401, 0x0C1, 0x601, 0x0A1, 0x381]);
        assert!(!t.in_transaction());
    }

    #[test]
    fn test_initialize_with_custom_config() {
        let trace = RefCell::new(BusTrace::new());
        let config = Ht1621Config {
            oscillator: Oscillator::Crystal32k,
            commons: Commons::Three,
            bias: BiasRatio::Third,
        };
        let lcd = Ht1621::new(sim_bus(&trace), config).initialize();
        assert_eq!(lcd.config(), &config);

        let t = trace.borrow();
        let mut commands = t.commands().flatten();
        assert_eq!(commands.nth(2), Some(Command::Oscillator(Oscillator::Crystal32k)));
        assert_eq!(
            commands.nth(1),
            Some(Command::BiasCommons {
                commons: Commons::Three,
                bias: BiasRatio::Third,
            })
        );
    }

    #[test]
    fn test_send_command_before_initialize() {
        let trace = RefCell::new(BusTrace::new());
        let mut lcd = Ht1621::new(sim_bus(&trace), Ht1621Config::default());

        lcd.send_command(Command::TimerEnable);

        let t = trace.borrow();
        assert_eq!(t.frames().len(), 1);
        assert_eq!(t.frames()[0].field(0, 12), 0x301);
    }

    #[test]
    fn test_refresh_frame_layout() {
        let trace = RefCell::new(BusTrace::new());
        let mut lcd = ready(&trace);

        lcd.set_memory(0, SegmentPattern(0x12));
        lcd.set_memory(1, SegmentPattern(0x34));
        lcd.set_memory(2, SegmentPattern(0x56));
        lcd.set_memory(3, SegmentPattern(0x78));
        lcd.refresh();

        let t = trace.borrow();
        assert_eq!(t.frames().len(), 1);
        let frame = t.frames()[0];
        assert_eq!(frame.len(), 9 + 16 + 16);
        assert_eq!(frame.field(0, 9), 5);
        assert_eq!(frame.field(9, 16), 0x3412);
        assert_eq!(frame.field(25, 16), 0x7856);
        assert_eq!(frame.refresh_image(), Some([0x12, 0x34, 0x56, 0x78]));
    }

    #[test]
    fn test_blank_refresh_is_full_length() {
        let trace = RefCell::new(BusTrace::new());
        let mut lcd = ready(&trace);

        lcd.refresh();

        let t = trace.borrow();
        assert_eq!(t.frames()[0].len(), 41);
        assert_eq!(t.frames()[0].refresh_image(), Some([0; MEMORY_SIZE]));
    }

    #[test]
    fn test_refresh_does_not_touch_memory() {
        let trace = RefCell::new(BusTrace::new());
        let mut lcd = ready(&trace);

        lcd.write_digits(&[1, 2, 3, 4]);
        let before = *lcd.memory();
        lcd.refresh();
        lcd.refresh();

        assert_eq!(*lcd.memory(), before);
        let t = trace.borrow();
        assert_eq!(t.frames()[0], t.frames()[1]);
    }

    #[test]
    fn test_write_digits_and_decimal_point() {
        let trace = RefCell::new(BusTrace::new());
        let mut lcd = ready(&trace);

        lcd.write_digits(&[1, 2, 3, 4, 5]);
        lcd.set_decimal_point(1, true);
        lcd.refresh();

        let t = trace.borrow();
        let image = t.frames()[0].refresh_image().unwrap();
        assert_eq!(image[0], digit_to_pattern(1).bits());
        assert_eq!(image[1], digit_to_pattern(2).with_decimal_point().bits());
        assert_eq!(image[2], digit_to_pattern(3).bits());
        assert_eq!(image[3], digit_to_pattern(4).bits());
    }

    #[test]
    fn test_clear() {
        let trace = RefCell::new(BusTrace::new());
        let mut lcd = ready(&trace);

        lcd.fill_digit(8);
        lcd.clear();
        lcd.refresh();

        assert_eq!(
            trace.borrow().frames()[0].refresh_image(),
            Some([0; MEMORY_SIZE])
        );
    }

    #[test]
    fn test_counter_scenario() {
        let trace = RefCell::new(BusTrace::new());
        let mut lcd = ready(&trace);

        let mut digit = 0u8;
        for _ in 0..20 {
            lcd.fill_digit(digit);
            lcd.refresh();
            digit = (digit + 1) % 10;
        }

        let t = trace.borrow();
        assert!(!t.overflowed());
        assert_eq!(t.frames().len(), 20);
        for (i, frame) in t.frames().iter().enumerate() {
            let p = digit_to_pattern((i % 10) as u8).bits();
            assert_eq!(frame.refresh_image(), Some([p; MEMORY_SIZE]), "refresh {}", i);
        }
        assert_eq!(t.stray_clocks(), 0);
        assert_eq!(t.glitches(), 0);
        assert_eq!(t.setup_violations(), 0);
        assert_eq!(t.hold_violations(), 0);
    }

    #[test]
    fn test_trait_object_usage() {
        fn show(display: &mut dyn SegmentDisplay, value: u8) {
            display.fill_digit(value);
            display.refresh();
        }

        let trace = RefCell::new(BusTrace::new());
        let mut lcd = ready(&trace);
        show(&mut lcd, 7);

        let p = digit_to_pattern(7).bits();
        assert_eq!(
            trace.borrow().frames()[0].refresh_image(),
            Some([p; MEMORY_SIZE])
        );
    }

    #[test]
    fn test_release_bus() {
        let trace = RefCell::new(BusTrace::new());
        let lcd = ready(&trace);

        let mut bus: SimBus<'_> = lcd.release();
        let mut tx = bus.begin_transaction();
        tx.transmit(Command::LcdOff.word());
        tx.end();

        assert_eq!(trace.borrow().frames()[0].command(), Some(Command::LcdOff));
    }
}
